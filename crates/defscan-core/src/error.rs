use thiserror::Error;

use defscan_report::ReportError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A report reached emission without two records. Always a tracker bug.
    #[error("duplicate processor returned a report with length={length} for name={name}")]
    InvariantViolation { name: String, length: usize },

    #[error(transparent)]
    Report(ReportError),
}

impl From<ReportError> for CoreError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NotDuplicated { name, length } => Self::InvariantViolation { name, length },
            other => Self::Report(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
