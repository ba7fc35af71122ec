use anyhow::Result;
use tracing::info_span;

use defscan_cli::pipeline::{ScanOptions, duplicates_json, list_packages, scan_document, scan_manifest};
use defscan_cli::types::ScanResult;

use crate::cli::{DocumentArgs, PackagesArgs, ReportArgs, ScanArgs};
use crate::summary::{print_packages, print_summary};

pub fn run_scan(args: &ScanArgs) -> Result<ScanResult> {
    let span = info_span!("scan", manifest = %args.manifest.display());
    let _guard = span.enter();
    let result = scan_manifest(&args.manifest, &scan_options(&args.report))?;
    print_result(&result, args.report.json)?;
    Ok(result)
}

pub fn run_document(args: &DocumentArgs) -> Result<ScanResult> {
    let span = info_span!("document", file = %args.file.display());
    let _guard = span.enter();
    let result = scan_document(&args.file, &scan_options(&args.report))?;
    print_result(&result, args.report.json)?;
    Ok(result)
}

pub fn run_packages(args: &PackagesArgs) -> Result<()> {
    let packages = list_packages(&args.manifest)?;
    print_packages(&packages);
    Ok(())
}

/// Exit code for a finished scan.
pub fn exit_code(result: &ScanResult, no_fail_on_critical: bool) -> i32 {
    if result.has_critical() && !no_fail_on_critical {
        1
    } else {
        0
    }
}

fn scan_options(args: &ReportArgs) -> ScanOptions {
    ScanOptions {
        reports_dir: args.reports_dir.clone(),
        policy: args.policy.map(Into::into),
        ignore_env: false,
    }
}

fn print_result(result: &ScanResult, json: bool) -> Result<()> {
    if json {
        println!("{}", duplicates_json(&result.duplicates)?);
    } else {
        print_summary(result);
    }
    Ok(())
}
