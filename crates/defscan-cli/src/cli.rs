//! CLI argument definitions for defscan.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use defscan_model::PolicyKind;

#[derive(Parser)]
#[command(
    name = "defscan",
    version,
    about = "Find definitions declared more than once across packages",
    long_about = "Find abstract definitions declared more than once across packages.\n\n\
                  Writes one Report_<Name>.xml per duplicated name into the reports\n\
                  folder and logs an error (critical) or warning line for each."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load every package of a manifest and report duplicated definitions.
    Scan(ScanArgs),

    /// Report duplicated definitions in one already merged XML document.
    Document(DocumentArgs),

    /// List the packages of a manifest and their definition files.
    Packages(PackagesArgs),
}

#[derive(Args)]
pub struct ReportArgs {
    /// Reports folder (default: DEFSCAN_REPORTS_DIR, then the manifest, then
    /// a `reports` folder next to the input).
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Which duplicates are critical.
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Print the reports as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Path to the `defscan.toml` manifest.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,

    /// Exit successfully even when critical duplicates were found.
    #[arg(long = "no-fail-on-critical")]
    pub no_fail_on_critical: bool,
}

#[derive(Args)]
pub struct DocumentArgs {
    /// Merged XML document whose root holds the definitions.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,

    /// Exit successfully even when critical duplicates were found.
    #[arg(long = "no-fail-on-critical")]
    pub no_fail_on_critical: bool,
}

#[derive(Args)]
pub struct PackagesArgs {
    /// Path to the `defscan.toml` manifest.
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

/// CLI criticality policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Every duplicate is critical.
    Always,
    /// Only duplicates spanning more than one package are critical.
    CrossPackage,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Always => PolicyKind::Always,
            PolicyArg::CrossPackage => PolicyKind::CrossPackage,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
