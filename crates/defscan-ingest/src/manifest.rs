//! Package manifest (`defscan.toml`) loading and reports directory resolution.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use defscan_model::PolicyKind;

use crate::error::{IngestError, Result};

/// Environment variable for overriding the reports directory.
pub const REPORTS_DIR_ENV_VAR: &str = "DEFSCAN_REPORTS_DIR";

/// Definitions folder inside each package when the manifest does not say.
pub const DEFAULT_DEFS_DIR: &str = "Defs";

/// Reports folder next to the manifest when nothing else is configured.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Relative paths are resolved against the manifest's folder.
    #[serde(default)]
    pub reports_dir: Option<PathBuf>,
    #[serde(default)]
    pub policy: Option<PolicyKind>,
    #[serde(default)]
    pub defs_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageEntry {
    pub id: String,
    /// Display name; defaults to the id.
    #[serde(default)]
    pub name: Option<String>,
    pub path: PathBuf,
}

impl PackageEntry {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A validated manifest together with the folder it was read from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub base_dir: PathBuf,
}

impl LoadedManifest {
    pub fn packages(&self) -> &[PackageEntry] {
        &self.manifest.packages
    }

    pub fn policy(&self) -> PolicyKind {
        self.manifest.scan.policy.unwrap_or_default()
    }

    pub fn defs_dir(&self) -> &str {
        self.manifest
            .scan
            .defs_dir
            .as_deref()
            .unwrap_or(DEFAULT_DEFS_DIR)
    }

    /// Absolute-or-manifest-relative root of a package.
    pub fn package_root(&self, entry: &PackageEntry) -> PathBuf {
        self.base_dir.join(&entry.path)
    }

    /// Reports directory resolution order:
    /// 1. `cli` (command line flag)
    /// 2. `env` (usually [`reports_dir_from_env`])
    /// 3. `scan.reports_dir` from the manifest
    /// 4. `reports/` next to the manifest
    pub fn reports_dir(&self, cli: Option<&Path>, env: Option<PathBuf>) -> PathBuf {
        if let Some(path) = cli {
            return path.to_path_buf();
        }
        if let Some(path) = env {
            return path;
        }
        match &self.manifest.scan.reports_dir {
            Some(configured) => self.base_dir.join(configured),
            None => self.base_dir.join(DEFAULT_REPORTS_DIR),
        }
    }
}

/// Reads [`REPORTS_DIR_ENV_VAR`], ignoring empty values.
pub fn reports_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(REPORTS_DIR_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn load_manifest(path: &Path) -> Result<LoadedManifest> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: Manifest = toml::from_str(&text).map_err(|source| IngestError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_manifest(&manifest, path)?;
    let base_dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok(LoadedManifest { manifest, base_dir })
}

fn validate_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let mut seen = BTreeSet::new();
    for entry in &manifest.packages {
        if entry.id.trim().is_empty() {
            return Err(IngestError::InvalidManifest {
                path: path.to_path_buf(),
                message: "package id must not be empty".to_string(),
            });
        }
        if entry.path.as_os_str().is_empty() {
            return Err(IngestError::InvalidManifest {
                path: path.to_path_buf(),
                message: format!("package {} has an empty path", entry.id),
            });
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(IngestError::DuplicatePackage {
                id: entry.id.clone(),
            });
        }
    }
    if let Some(defs_dir) = &manifest.scan.defs_dir
        && defs_dir.trim().is_empty()
    {
        return Err(IngestError::InvalidManifest {
            path: path.to_path_buf(),
            message: "scan.defs_dir must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defscan.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_manifest() {
        let (dir, path) = write_manifest(
            r#"
[scan]
policy = "cross-package"
reports_dir = "out/reports"

[[packages]]
id = "ludeon.core"
name = "Core"
path = "Core"

[[packages]]
id = "author.furniture"
path = "mods/Furniture"
"#,
        );
        let loaded = load_manifest(&path).unwrap();
        assert_eq!(loaded.packages().len(), 2);
        assert_eq!(loaded.policy(), PolicyKind::CrossPackage);
        assert_eq!(loaded.defs_dir(), DEFAULT_DEFS_DIR);
        assert_eq!(loaded.packages()[1].display_name(), "author.furniture");
        assert_eq!(
            loaded.package_root(&loaded.packages()[1]),
            dir.path().join("mods/Furniture")
        );
        assert_eq!(
            loaded.reports_dir(None, None),
            dir.path().join("out/reports")
        );
    }

    #[test]
    fn test_reports_dir_precedence() {
        let (dir, path) = write_manifest("[scan]\nreports_dir = \"configured\"\n");
        let loaded = load_manifest(&path).unwrap();
        assert_eq!(
            loaded.reports_dir(Some(Path::new("/cli")), Some(PathBuf::from("/env"))),
            PathBuf::from("/cli")
        );
        assert_eq!(
            loaded.reports_dir(None, Some(PathBuf::from("/env"))),
            PathBuf::from("/env")
        );
        assert_eq!(loaded.reports_dir(None, None), dir.path().join("configured"));
    }

    #[test]
    fn test_defaults_when_scan_section_missing() {
        let (dir, path) = write_manifest("");
        let loaded = load_manifest(&path).unwrap();
        assert!(loaded.packages().is_empty());
        assert_eq!(loaded.policy(), PolicyKind::Always);
        assert_eq!(loaded.reports_dir(None, None), dir.path().join("reports"));
    }

    #[test]
    fn test_duplicate_package_ids_rejected() {
        let (_dir, path) = write_manifest(
            r#"
[[packages]]
id = "a"
path = "A"

[[packages]]
id = "a"
path = "B"
"#,
        );
        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, IngestError::DuplicatePackage { id } if id == "a"));
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let (_dir, path) = write_manifest("[scan]\npolicy = \"sometimes\"\n");
        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, IngestError::ManifestParse { .. }));
    }
}
