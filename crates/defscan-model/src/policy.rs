use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named criticality policies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Every duplicate is critical.
    #[default]
    Always,
    /// Critical only when the records span more than one package.
    CrossPackage,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Always => "always",
            PolicyKind::CrossPackage => "cross-package",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(PolicyKind::Always),
            "cross-package" | "cross_package" => Ok(PolicyKind::CrossPackage),
            other => Err(format!("unknown policy '{other}'")),
        }
    }
}
