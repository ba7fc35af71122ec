//! Duplicate report output.
//!
//! - **Report folder**: cleared on first use, reused afterwards
//! - **Report files**: one `Report_<Name>.xml` per duplicated definition
//! - **Notices**: one error or warning line per report

mod error;
mod folder;
mod naming;
mod notify;
mod writer;
mod xml;

// Re-export public types and functions
pub use error::ReportError;
pub use folder::ReportFolder;
pub use naming::{capitalize_first, report_file_name, sanitize_filename};
pub use notify::{
    TAG_CRITICAL, TAG_IGNORABLE, format_duplicate_message, log_duplicate, severity_tag,
};
pub use writer::{RunSummary, emit};
pub use xml::{REPORT_ROOT, render_report, write_report};
