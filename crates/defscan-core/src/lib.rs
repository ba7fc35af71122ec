//! Duplicate definition detection.
//!
//! A run walks the top-level definitions of a merged [`defscan_model::Document`]
//! once, groups qualifying definitions by `Name`, and hands every name seen
//! at least twice to the report writer.
//!
//! - [`DuplicateTracker`]: name to report map for one run
//! - [`scan`]: lazy pass yielding a [`ReportReady`] per newly duplicated name
//! - [`ProcessContext`]: report folder and policy shared by every run

pub mod error;
pub mod policy;
pub mod scanner;
pub mod session;
pub mod tracker;

pub use error::{CoreError, Result};
pub use policy::{AlwaysCritical, CriticalityPolicy, CrossPackage, PolicyFn, from_fn, policy_for};
pub use scanner::{ABSTRACT_ATTRIBUTE, NAME_ATTRIBUTE, Scan, definition_name, scan};
pub use session::{ProcessContext, RunSession};
pub use tracker::{DuplicateTracker, ReportReady};
