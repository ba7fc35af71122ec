//! CLI library components for defscan.

pub mod logging;
pub mod pipeline;
pub mod types;
