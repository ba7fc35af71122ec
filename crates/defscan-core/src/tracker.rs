//! Groups definitions by name and detects the first duplicate of each.

use std::collections::HashMap;
use std::path::PathBuf;

use defscan_model::{DuplicateReport, DuplicationRecord, Element, Origin};

use crate::error::{CoreError, Result};
use crate::policy::CriticalityPolicy;

/// Signal that a name has just been seen for the second time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportReady {
    pub name: String,
    /// Position among this run's ready reports, starting at 0.
    pub ordinal: usize,
}

/// Name to report map for one run.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    reports: HashMap<String, DuplicateReport>,
    ready: Vec<String>,
}

impl DuplicateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record for `name`.
    ///
    /// Returns `Some` only on the call that takes the report from one record
    /// to two; earlier and later calls return `None`.
    pub fn record(
        &mut self,
        name: &str,
        definition: &Element,
        origin: Origin,
        file_path: Option<PathBuf>,
    ) -> Option<ReportReady> {
        let report = self
            .reports
            .entry(name.to_string())
            .or_insert_with(|| DuplicateReport::new(name));
        report.push(DuplicationRecord::new(definition.clone(), origin, file_path));
        if report.len() != 2 {
            return None;
        }
        self.ready.push(name.to_string());
        Some(ReportReady {
            name: name.to_string(),
            ordinal: self.ready.len() - 1,
        })
    }

    pub fn get(&self, name: &str) -> Option<&DuplicateReport> {
        self.reports.get(name)
    }

    /// Number of distinct names seen.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.ready.len()
    }

    /// Removes the ready reports in ready order, fixes their criticality,
    /// and forgets every other name.
    pub fn take_ready(&mut self, policy: &dyn CriticalityPolicy) -> Result<Vec<DuplicateReport>> {
        let names = std::mem::take(&mut self.ready);
        let mut reports = Vec::with_capacity(names.len());
        let mut outcome = Ok(());
        for name in names {
            let Some(mut report) = self.reports.remove(&name) else {
                outcome = Err(CoreError::InvariantViolation { name, length: 0 });
                break;
            };
            if !report.has_duplicates() {
                outcome = Err(CoreError::InvariantViolation {
                    name,
                    length: report.len(),
                });
                break;
            }
            report.finalize(policy.is_critical(report.records()));
            reports.push(report);
        }
        self.clear();
        outcome.map(|()| reports)
    }

    pub fn clear(&mut self) {
        self.reports.clear();
        self.ready.clear();
    }
}
