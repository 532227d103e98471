//! Fault isolation tests: checker failures, scan-unit failures, summary flags

use crate::common::fakes::*;
use crate::common::fixtures::make_repo;
use chrono::{Duration, Local};
use std::sync::Arc;
use tempfile::TempDir;
use weekly::checkers::{CheckStatus, Checker};
use weekly::report::ArtifactWriter;
use weekly::scanner::api::{
    scan_one, RepositoryDescriptor, RepositoryMetadata, ReportFormat, ScanConfig, ScanContext,
    ScanManager, ScanSummaryEntry,
};

fn mixed_checkers() -> Vec<Arc<dyn Checker>> {
    vec![
        Arc::new(FixedChecker {
            name: "ok",
            status: CheckStatus::Success,
        }),
        Arc::new(FailingChecker),
        Arc::new(PanickingChecker),
        Arc::new(NotApplicableChecker),
        Arc::new(FixedChecker {
            name: "warn",
            status: CheckStatus::Warning,
        }),
    ]
}

fn context(root: &std::path::Path, out: &std::path::Path, analyzer: Arc<dyn weekly::changelog::ChangeAnalyzer>) -> ScanContext {
    let config = ScanConfig::new(root, out).with_since(Some(Local::now() - Duration::days(7)));
    ScanContext::new(
        Arc::new(config),
        registry_of(mixed_checkers()),
        analyzer,
        ArtifactWriter::new(out, ReportFormat::Html).unwrap(),
    )
}

#[tokio::test]
async fn test_failing_checkers_leave_their_slot_absent() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repo(&root, "acme/widget");
    let out = dir.path().join("out");

    let manager = ScanManager::new(ScanConfig::new(&root, &out))
        .with_registry(registry_of(mixed_checkers()));
    let results = manager.scan_all().await.unwrap();

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.error.is_none());
    assert_eq!(
        result.results.keys().cloned().collect::<Vec<_>>(),
        vec!["not_applicable", "ok", "warn"]
    );
    assert!(result.results["not_applicable"].is_none());
    assert_eq!(result.results["warn"].as_ref().unwrap().status, CheckStatus::Warning);
    assert!(out.join("acme/widget/latest.html").exists());
    assert!(out.join("summary.html").exists());
}

#[tokio::test]
async fn test_changelog_failure_is_recorded_and_scan_continues() {
    let dir = TempDir::new().unwrap();
    let path = make_repo(dir.path(), "acme/widget");
    let out = dir.path().join("out");
    let descriptor =
        RepositoryDescriptor::new(&path, "acme", "widget", RepositoryMetadata::default()).unwrap();

    let result = scan_one(descriptor, context(dir.path(), &out, Arc::new(FailingAnalyzer))).await;

    let error = result.error.as_deref().unwrap();
    assert!(error.contains("Changelog analysis failed"), "{}", error);
    assert!(error.contains("history unavailable"), "{}", error);
    assert!(result.changes.is_none());
    assert!(result.results.contains_key("ok"));
    assert!(result.report_path.is_some());
    assert!(!out.join("acme/widget/changelog.md").exists());

    let entry = ScanSummaryEntry::from_result(&result, true);
    assert!(entry.failed);
    assert_eq!(entry.error.as_deref(), Some(error));
}

#[tokio::test]
async fn test_changelog_written_when_analysis_succeeds() {
    let dir = TempDir::new().unwrap();
    let path = make_repo(dir.path(), "widget");
    let out = dir.path().join("out");
    let descriptor =
        RepositoryDescriptor::new(&path, "", "widget", RepositoryMetadata::default()).unwrap();

    let result = scan_one(descriptor, context(dir.path(), &out, Arc::new(EmptyAnalyzer))).await;

    assert!(result.error.is_none());
    assert!(result.changes.is_some());
    let changelog = std::fs::read_to_string(out.join("widget/changelog.md")).unwrap();
    assert!(changelog.contains("Change Summary"));
}

#[tokio::test]
async fn test_report_failure_is_recorded() {
    let dir = TempDir::new().unwrap();
    let path = make_repo(dir.path(), "widget");
    // A file where the repository's report directory should go
    let out = dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("widget"), "not a directory").unwrap();
    let descriptor =
        RepositoryDescriptor::new(&path, "", "widget", RepositoryMetadata::default()).unwrap();

    let result = scan_one(descriptor, context(dir.path(), &out, Arc::new(EmptyAnalyzer))).await;

    let error = result.error.as_deref().unwrap();
    assert!(error.contains("failed"), "{}", error);
    assert!(result.report_path.is_none());
    assert!(result.results.contains_key("ok"));
}

#[tokio::test]
async fn test_summary_only_skips_repository_artifacts() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repo(&root, "acme/widget");
    let out = dir.path().join("out");

    let manager = ScanManager::new(ScanConfig::new(&root, &out).with_summary_only(true))
        .with_registry(registry_of(mixed_checkers()));
    let results = manager.scan_all().await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].report_path.is_none());
    assert!(!out.join("acme").exists());
    let summary = std::fs::read_to_string(out.join("summary.html")).unwrap();
    assert!(summary.contains("widget"));
}

#[tokio::test]
async fn test_unit_that_escapes_isolation_is_dropped_and_batch_continues() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repo(&root, "acme/widget");
    make_repo(&root, "acme/gadget");
    let out = dir.path().join("out");
    let progress = Arc::new(RecordingProgress::default());

    let config = ScanConfig::new(&root, &out)
        .with_since(Some(Local::now() - Duration::days(7)))
        .with_jobs(2);
    let results = ScanManager::new(config)
        .with_registry(registry_of(mixed_checkers()))
        .with_analyzer(Arc::new(PanickingAnalyzer { repository: "gadget" }))
        .with_progress(progress.clone())
        .scan_all()
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].repository.name(), "widget");

    let events = progress.events();
    assert_eq!(events.first().unwrap(), "started 2");
    assert!(events.iter().any(|e| e.starts_with("advanced 2/2 ")), "{:?}", events);
    assert_eq!(events.last().unwrap(), "finished 1/2");

    let summary = std::fs::read_to_string(out.join("summary.html")).unwrap();
    assert!(summary.contains("widget"));
    assert!(!summary.contains("gadget"));
    assert!(!out.join("acme/gadget/latest.html").exists());
}
