//! The report output folder.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ReportError;
use crate::naming::report_file_name;

/// Output folder that is cleared once, on its first preparation, and then
/// reused for every later emission made through the same value.
///
/// Keep one `ReportFolder` for the lifetime of the process: reports from
/// earlier emissions stay on disk next to the newer ones.
#[derive(Debug, Clone)]
pub struct ReportFolder {
    path: PathBuf,
    prepared: bool,
}

impl ReportFolder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prepared: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Deletes and recreates the folder on the first call; no-op afterwards.
    pub fn prepare(&mut self) -> Result<(), ReportError> {
        if self.prepared {
            return Ok(());
        }
        if self.path.exists() {
            debug!(path = %self.path.display(), "clearing previous reports");
            fs::remove_dir_all(&self.path).map_err(|source| ReportError::ClearFolder {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::create_dir_all(&self.path).map_err(|source| ReportError::CreateFolder {
            path: self.path.clone(),
            source,
        })?;
        self.prepared = true;
        Ok(())
    }

    /// Where the report for `name` is written.
    pub fn report_path(&self, name: &str) -> PathBuf {
        self.path.join(report_file_name(name))
    }
}
