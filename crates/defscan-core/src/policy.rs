//! Criticality policies: which duplicates are escalated to error level.

use defscan_model::{DuplicationRecord, PolicyKind};

/// Decides, once per report, whether a duplicate is critical.
pub trait CriticalityPolicy {
    fn is_critical(&self, records: &[DuplicationRecord]) -> bool;

    fn name(&self) -> &str {
        "custom"
    }
}

/// Every duplicate is critical.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCritical;

impl CriticalityPolicy for AlwaysCritical {
    fn is_critical(&self, _records: &[DuplicationRecord]) -> bool {
        true
    }

    fn name(&self) -> &str {
        PolicyKind::Always.as_str()
    }
}

/// Critical when the contributions come from more than one package.
/// Redefinitions inside a single package stay warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossPackage;

impl CriticalityPolicy for CrossPackage {
    fn is_critical(&self, records: &[DuplicationRecord]) -> bool {
        let Some(first) = records.first() else {
            return false;
        };
        records
            .iter()
            .any(|record| record.package_id() != first.package_id())
    }

    fn name(&self) -> &str {
        PolicyKind::CrossPackage.as_str()
    }
}

/// Adapts a closure into a policy.
pub struct PolicyFn<F>(pub F);

impl<F> CriticalityPolicy for PolicyFn<F>
where
    F: Fn(&[DuplicationRecord]) -> bool,
{
    fn is_critical(&self, records: &[DuplicationRecord]) -> bool {
        (self.0)(records)
    }
}

pub fn from_fn<F>(f: F) -> PolicyFn<F>
where
    F: Fn(&[DuplicationRecord]) -> bool,
{
    PolicyFn(f)
}

pub fn policy_for(kind: PolicyKind) -> Box<dyn CriticalityPolicy> {
    match kind {
        PolicyKind::Always => Box::new(AlwaysCritical),
        PolicyKind::CrossPackage => Box::new(CrossPackage),
    }
}
