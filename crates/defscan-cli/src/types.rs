use std::path::PathBuf;

use defscan_model::{DuplicateReport, Origin};
use defscan_report::RunSummary;

/// Result of one `scan` or `document` invocation.
#[derive(Debug)]
pub struct ScanResult {
    /// Manifest or document that was scanned.
    pub source: PathBuf,
    pub policy: String,
    pub packages: Vec<PackageSummary>,
    /// Top-level elements handed to the scanner.
    pub definitions: usize,
    pub summary: RunSummary,
    pub duplicates: Vec<DuplicateReport>,
}

impl ScanResult {
    pub fn has_critical(&self) -> bool {
        self.summary.has_critical()
    }
}

#[derive(Debug, Clone)]
pub struct PackageSummary {
    pub origin: Origin,
    pub defs_dir: PathBuf,
    pub files: usize,
    /// Only known once the package has been loaded.
    pub definitions: Option<usize>,
}
