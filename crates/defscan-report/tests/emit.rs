//! Integration tests for report emission.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use defscan_model::{DuplicateReport, DuplicationRecord, Element, NodeId, Origin};
use defscan_report::{ReportError, ReportFolder, emit};
use tempfile::TempDir;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

struct CapturedGuard(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedGuard;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedGuard(Arc::clone(&self.0))
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, logs.text())
}

fn report(name: &str, packages: &[&str], critical: bool) -> DuplicateReport {
    let mut report = DuplicateReport::new(name);
    for (index, package) in packages.iter().enumerate() {
        let element = Element::new(NodeId::new(index as u32), "ThingDef")
            .with_attribute("Name", name)
            .with_attribute("Abstract", "True");
        report.push(DuplicationRecord::new(
            element,
            Origin::new(*package, package.to_uppercase()),
            Some(PathBuf::from(format!("/mods/{package}/Defs/{name}.xml"))),
        ));
    }
    report.finalize(critical);
    report
}

#[test]
fn emit_writes_one_file_and_one_line_per_report() {
    let dir = TempDir::new().unwrap();
    let mut folder = ReportFolder::new(dir.path().join("reports"));
    let reports = vec![
        report("bed", &["a", "b"], true),
        report("Chair", &["a", "a", "c"], false),
    ];

    let (summary, logs) = with_captured_logs(|| emit(&mut folder, &reports));
    let summary = summary.unwrap();

    assert_eq!(summary.report_count(), 2);
    assert_eq!(summary.critical, 1);
    assert_eq!(summary.ignorable, 1);
    assert!(summary.has_critical());
    assert!(summary.written[0].ends_with("Report_Bed.xml"));
    assert!(summary.written[1].ends_with("Report_Chair.xml"));
    for path in &summary.written {
        assert!(path.is_file());
    }

    assert_eq!(logs.matches("[DUPLICATE:").count(), 2);
    assert!(logs.contains("ERROR"));
    assert!(logs.contains("[DUPLICATE:CRITICAL] duplicate found for Name=bed"));
    assert!(logs.contains("WARN"));
    assert!(logs.contains("[DUPLICATE:IGNOREME] duplicate found for Name=Chair"));
    assert!(logs.contains("3. PackageId=c | ModName=C | XmlFilePath=/mods/c/Defs/Chair.xml"));
    assert!(logs.contains("finished creating reports at"));
}

#[test]
fn second_emission_keeps_earlier_reports() {
    let dir = TempDir::new().unwrap();
    let reports_dir = dir.path().join("reports");
    fs::create_dir_all(&reports_dir).unwrap();
    fs::write(reports_dir.join("Report_Stale.xml"), "<old/>").unwrap();

    let mut folder = ReportFolder::new(&reports_dir);
    emit(&mut folder, &[report("Bed", &["a", "b"], true)]).unwrap();
    assert!(!reports_dir.join("Report_Stale.xml").exists());

    emit(&mut folder, &[report("Chair", &["a", "b"], true)]).unwrap();
    assert!(reports_dir.join("Report_Bed.xml").is_file());
    assert!(reports_dir.join("Report_Chair.xml").is_file());
}

#[test]
fn a_fresh_folder_value_clears_again() {
    let dir = TempDir::new().unwrap();
    let reports_dir = dir.path().join("reports");

    let mut first = ReportFolder::new(&reports_dir);
    emit(&mut first, &[report("Bed", &["a", "b"], true)]).unwrap();

    let mut second = ReportFolder::new(&reports_dir);
    emit(&mut second, &[report("Chair", &["a", "b"], true)]).unwrap();
    assert!(!reports_dir.join("Report_Bed.xml").exists());
    assert!(reports_dir.join("Report_Chair.xml").is_file());
}

#[test]
fn single_record_report_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut folder = ReportFolder::new(dir.path().join("reports"));
    let err = emit(&mut folder, &[report("Bed", &["a"], true)]).unwrap_err();
    match err {
        ReportError::NotDuplicated { name, length } => {
            assert_eq!(name, "Bed");
            assert_eq!(length, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_batch_still_prepares_folder() {
    let dir = TempDir::new().unwrap();
    let reports_dir = dir.path().join("reports");
    let mut folder = ReportFolder::new(&reports_dir);
    let summary = emit(&mut folder, &[]).unwrap();
    assert_eq!(summary.report_count(), 0);
    assert!(reports_dir.is_dir());
    assert!(folder.is_prepared());
}
