//! Human-facing log lines for duplicate reports.

use std::fmt::Write as _;

use tracing::{error, warn};

use defscan_model::DuplicateReport;

/// Tag for duplicates escalated to error level.
pub const TAG_CRITICAL: &str = "CRITICAL";

/// Tag for duplicates that stay at warning level.
pub const TAG_IGNORABLE: &str = "IGNOREME";

pub fn severity_tag(report: &DuplicateReport) -> &'static str {
    if report.is_critical() {
        TAG_CRITICAL
    } else {
        TAG_IGNORABLE
    }
}

/// Header line followed by one line per record, in scan order:
///
/// ```text
/// [DUPLICATE:CRITICAL] duplicate found for Name=Bed
/// 	1. PackageId=a.mod | ModName=A | XmlFilePath=/mods/a/Defs/Beds.xml
/// ```
pub fn format_duplicate_message(report: &DuplicateReport) -> String {
    let mut message = format!(
        "[DUPLICATE:{}] duplicate found for Name={}",
        severity_tag(report),
        report.name()
    );
    for (index, record) in report.records().iter().enumerate() {
        let path = record
            .xml_file_path()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        // Writing to a String cannot fail.
        let _ = write!(
            message,
            "\n\t{}. PackageId={} | ModName={} | XmlFilePath={}",
            index + 1,
            record.package_id(),
            record.mod_name(),
            path
        );
    }
    message
}

/// Emits the report's line at error level when critical, warning otherwise.
pub fn log_duplicate(report: &DuplicateReport) {
    let message = format_duplicate_message(report);
    if report.is_critical() {
        error!(name = report.name(), count = report.len(), "{message}");
    } else {
        warn!(name = report.name(), count = report.len(), "{message}");
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use defscan_model::{DuplicationRecord, Element, NodeId, Origin};

    use super::*;

    fn report(critical: bool) -> DuplicateReport {
        let mut report = DuplicateReport::new("Bed");
        for (id, origin, path) in [
            (1, Origin::new("a.mod", "A"), Some(PathBuf::from("/mods/a/Defs/Beds.xml"))),
            (2, Origin::core(), None),
        ] {
            let element = Element::new(NodeId::new(id), "ThingDef").with_attribute("Name", "Bed");
            report.push(DuplicationRecord::new(element, origin, path));
        }
        report.finalize(critical);
        report
    }

    #[test]
    fn test_format_critical() {
        assert_eq!(
            format_duplicate_message(&report(true)),
            "[DUPLICATE:CRITICAL] duplicate found for Name=Bed\n\
             \t1. PackageId=a.mod | ModName=A | XmlFilePath=/mods/a/Defs/Beds.xml\n\
             \t2. PackageId=core | ModName=Core | XmlFilePath="
        );
    }

    #[test]
    fn test_format_ignorable() {
        let message = format_duplicate_message(&report(false));
        assert!(message.starts_with("[DUPLICATE:IGNOREME]"));
        assert_eq!(severity_tag(&report(false)), TAG_IGNORABLE);
    }
}
