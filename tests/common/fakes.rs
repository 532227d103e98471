//! Stand-in checkers, analyzers and progress sinks

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use weekly::changelog::{ChangeAnalyzer, ChangeSummary, ChangelogError};
use weekly::checkers::{CheckError, CheckResult, CheckStatus, Checker, CheckerRegistry, Project};
use weekly::scanner::ProgressSink;

/// Always returns the same status
pub struct FixedChecker {
    pub name: &'static str,
    pub status: CheckStatus,
}

impl Checker for FixedChecker {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "fixed outcome"
    }

    fn check(&self, _project: &Project) -> Result<Option<CheckResult>, CheckError> {
        Ok(Some(CheckResult::new(self.name, self.status, self.name, "")))
    }
}

/// Never applies
pub struct NotApplicableChecker;

impl Checker for NotApplicableChecker {
    fn name(&self) -> &'static str {
        "not_applicable"
    }

    fn description(&self) -> &'static str {
        "never applies"
    }

    fn check(&self, _project: &Project) -> Result<Option<CheckResult>, CheckError> {
        Ok(None)
    }
}

pub struct FailingChecker;

impl Checker for FailingChecker {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn description(&self) -> &'static str {
        "returns an error"
    }

    fn check(&self, _project: &Project) -> Result<Option<CheckResult>, CheckError> {
        Err(CheckError::Failed {
            checker: "failing".to_string(),
            message: "simulated failure".to_string(),
        })
    }
}

pub struct PanickingChecker;

impl Checker for PanickingChecker {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn description(&self) -> &'static str {
        "panics"
    }

    fn check(&self, _project: &Project) -> Result<Option<CheckResult>, CheckError> {
        panic!("checker blew up");
    }
}

/// Sleeps while tracking how many instances run at the same time
#[derive(Clone)]
pub struct SlowChecker {
    pub delay: Duration,
    pub in_flight: Arc<AtomicUsize>,
    pub peak: Arc<AtomicUsize>,
}

impl SlowChecker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl Checker for SlowChecker {
    fn name(&self) -> &'static str {
        "slow"
    }

    fn description(&self) -> &'static str {
        "sleeps"
    }

    fn check(&self, _project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Some(CheckResult::new("slow", CheckStatus::Success, "Slow", "")))
    }
}

pub fn registry_of(checkers: Vec<Arc<dyn Checker>>) -> CheckerRegistry {
    CheckerRegistry::with_checkers(checkers)
}

/// Change analyzer that always fails
pub struct FailingAnalyzer;

#[async_trait]
impl ChangeAnalyzer for FailingAnalyzer {
    async fn summarize(
        &self,
        _repo: &Path,
        _since: DateTime<Local>,
    ) -> Result<ChangeSummary, ChangelogError> {
        Err(ChangelogError::Parse {
            record: String::new(),
            message: "history unavailable".to_string(),
        })
    }
}

/// Change analyzer that reports no commits
pub struct EmptyAnalyzer;

#[async_trait]
impl ChangeAnalyzer for EmptyAnalyzer {
    async fn summarize(
        &self,
        _repo: &Path,
        since: DateTime<Local>,
    ) -> Result<ChangeSummary, ChangelogError> {
        Ok(ChangeSummary::empty(since))
    }
}

/// Change analyzer that panics for one repository and reports nothing elsewhere
pub struct PanickingAnalyzer {
    pub repository: &'static str,
}

#[async_trait]
impl ChangeAnalyzer for PanickingAnalyzer {
    async fn summarize(
        &self,
        repo: &Path,
        since: DateTime<Local>,
    ) -> Result<ChangeSummary, ChangelogError> {
        if repo.file_name().is_some_and(|name| name == self.repository) {
            panic!("history walker crashed");
        }
        Ok(ChangeSummary::empty(since))
    }
}

/// Records every progress callback
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn started(&self, total: usize) {
        self.events.lock().unwrap().push(format!("started {}", total));
    }

    fn advanced(&self, done: usize, total: usize, label: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("advanced {}/{} {}", done, total, label));
    }

    fn finished(&self, scanned: usize, total: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("finished {}/{}", scanned, total));
    }
}
