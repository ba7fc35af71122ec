//! Run and process state for the duplicate report pipeline.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, info_span};

use defscan_model::{Document, DuplicateReport, OriginLookup};
use defscan_report::{ReportFolder, RunSummary, emit};

use crate::error::Result;
use crate::policy::{AlwaysCritical, CriticalityPolicy};
use crate::scanner::scan;
use crate::tracker::DuplicateTracker;

/// State that lives for one run only. Cleared when the run ends, whether it
/// succeeded or not.
#[derive(Debug, Default)]
pub struct RunSession {
    tracker: DuplicateTracker,
}

impl RunSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracker(&self) -> &DuplicateTracker {
        &self.tracker
    }

    pub fn clear(&mut self) {
        self.tracker.clear();
    }
}

/// State that outlives runs: the report folder (cleared on the first run
/// only), the criticality policy, and the latest run's reports.
///
/// Runs take `&mut self`, so one context never runs twice at once. Share it
/// between threads behind a `Mutex`.
pub struct ProcessContext {
    folder: ReportFolder,
    policy: Box<dyn CriticalityPolicy>,
    duplicates: Vec<DuplicateReport>,
    runs: usize,
}

impl ProcessContext {
    pub fn new(reports_dir: impl AsRef<Path>) -> Self {
        Self {
            folder: ReportFolder::new(reports_dir.as_ref()),
            policy: Box::new(AlwaysCritical),
            duplicates: Vec::new(),
            runs: 0,
        }
    }

    #[must_use]
    pub fn with_policy(self, policy: impl CriticalityPolicy + 'static) -> Self {
        self.with_boxed_policy(Box::new(policy))
    }

    #[must_use]
    pub fn with_boxed_policy(mut self, policy: Box<dyn CriticalityPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Reports of the most recent run, until the next run replaces them.
    pub fn duplicates(&self) -> &[DuplicateReport] {
        &self.duplicates
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Runs the pipeline with a fresh [`RunSession`].
    pub fn run(&mut self, document: &Document, lookup: &dyn OriginLookup) -> Result<RunSummary> {
        let mut session = RunSession::new();
        self.parse_create_reports(&mut session, document, lookup)
    }

    /// Scans `document`, writes a report for every duplicated definition
    /// name, and logs each one.
    ///
    /// # Errors
    ///
    /// Fails on a tracker invariant violation or on any filesystem error while
    /// preparing the folder or writing a report. Nothing is retried.
    pub fn parse_create_reports(
        &mut self,
        session: &mut RunSession,
        document: &Document,
        lookup: &dyn OriginLookup,
    ) -> Result<RunSummary> {
        let started = Instant::now();
        self.runs += 1;
        let span = info_span!("duplicates", run = self.runs);
        let _guard = span.enter();

        let outcome = self.scan_and_emit(session, document, lookup);
        session.clear();
        let mut summary = outcome?;

        summary.duration = started.elapsed();
        info!(
            "creating duplication reports took {} ms",
            summary.duration.as_millis()
        );
        Ok(summary)
    }

    fn scan_and_emit(
        &mut self,
        session: &mut RunSession,
        document: &Document,
        lookup: &dyn OriginLookup,
    ) -> Result<RunSummary> {
        let mut pass = scan(document, lookup, &mut session.tracker);
        for ready in pass.by_ref() {
            debug!(name = %ready.name, ordinal = ready.ordinal, "duplicate detected");
        }
        let candidates = pass.candidates();
        debug!(candidates, "scan complete");

        self.duplicates.clear();
        self.duplicates = session.tracker.take_ready(self.policy.as_ref())?;
        Ok(emit(&mut self.folder, &self.duplicates)?)
    }
}

impl std::fmt::Debug for ProcessContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessContext")
            .field("folder", &self.folder)
            .field("policy", &self.policy.name())
            .field("duplicates", &self.duplicates.len())
            .field("runs", &self.runs)
            .finish()
    }
}
