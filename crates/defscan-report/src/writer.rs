//! Persists and announces a batch of duplicate reports.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use defscan_model::DuplicateReport;

use crate::error::ReportError;
use crate::folder::ReportFolder;
use crate::notify::log_duplicate;
use crate::xml::write_report;

/// Outcome of one emission.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports_dir: PathBuf,
    /// Written report files, in emission order.
    pub written: Vec<PathBuf>,
    pub critical: usize,
    pub ignorable: usize,
    /// Wall-clock time of the whole scan and write pipeline; filled in by
    /// the caller that timed it.
    pub duration: Duration,
}

impl RunSummary {
    pub fn report_count(&self) -> usize {
        self.written.len()
    }

    pub fn has_critical(&self) -> bool {
        self.critical > 0
    }
}

/// Prepares the folder, then writes and logs every report in order.
///
/// Each file is fully written before its log line is emitted. The first
/// failure aborts the batch; files written before it stay on disk.
pub fn emit(folder: &mut ReportFolder, reports: &[DuplicateReport]) -> Result<RunSummary, ReportError> {
    folder.prepare()?;

    let mut summary = RunSummary {
        reports_dir: folder.path().to_path_buf(),
        ..RunSummary::default()
    };
    for report in reports {
        if !report.has_duplicates() {
            return Err(ReportError::NotDuplicated {
                name: report.name().to_string(),
                length: report.len(),
            });
        }
        let path = folder.report_path(report.name());
        write_report(&path, report)?;
        log_duplicate(report);
        if report.is_critical() {
            summary.critical += 1;
        } else {
            summary.ignorable += 1;
        }
        summary.written.push(path);
    }

    info!(
        reports_dir = %folder.path().display(),
        report_count = summary.written.len(),
        "finished creating reports at {}",
        folder.path().display()
    );
    Ok(summary)
}
