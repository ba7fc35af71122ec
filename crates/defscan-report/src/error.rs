#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to clear report folder {path}: {source}")]
    ClearFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create report folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {message}")]
    Xml { message: String },

    #[error("report for name={name} has length={length}, expected at least 2 records")]
    NotDuplicated { name: String, length: usize },
}

impl ReportError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml {
            message: err.to_string(),
        }
    }
}
