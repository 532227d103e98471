//! Worker pool bounds and progress reporting

use crate::common::fakes::{registry_of, RecordingProgress, SlowChecker};
use crate::common::fixtures::make_repo;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use weekly::scanner::api::{ScanConfig, ScanManager};

const DELAY: Duration = Duration::from_millis(150);

fn make_repos(root: &std::path::Path, count: usize) {
    for i in 0..count {
        make_repo(root, &format!("org/repo{:02}", i));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_jobs_bounds_parallel_scans() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repos(&root, 10);
    let slow = SlowChecker::new(DELAY);

    let manager = ScanManager::new(
        ScanConfig::new(&root, dir.path().join("out"))
            .with_jobs(2)
            .with_summary_only(true),
    )
    .with_registry(registry_of(vec![Arc::new(slow.clone())]));

    let started = Instant::now();
    let results = manager.scan_all().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(results.len(), 10);
    assert_eq!(slow.peak(), 2);
    // Ten units, two at a time
    assert!(elapsed >= DELAY * 5, "finished too fast: {:?}", elapsed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_job_runs_sequentially() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repos(&root, 4);
    let slow = SlowChecker::new(Duration::from_millis(50));

    let manager = ScanManager::new(
        ScanConfig::new(&root, dir.path().join("out"))
            .with_jobs(1)
            .with_summary_only(true),
    )
    .with_registry(registry_of(vec![Arc::new(slow.clone())]));

    assert_eq!(manager.scan_all().await.unwrap().len(), 4);
    assert_eq!(slow.peak(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_more_jobs_than_repositories() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repos(&root, 3);
    let slow = SlowChecker::new(Duration::from_millis(10));

    let manager = ScanManager::new(
        ScanConfig::new(&root, dir.path().join("out")).with_jobs(16),
    )
    .with_registry(registry_of(vec![Arc::new(slow.clone())]));

    assert_eq!(manager.scan_all().await.unwrap().len(), 3);
    assert!(slow.peak() <= 3);
}

#[tokio::test]
async fn test_progress_reports_every_repository() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repos(&root, 3);
    let progress = Arc::new(RecordingProgress::default());

    let manager = ScanManager::new(
        ScanConfig::new(&root, dir.path().join("out")).with_summary_only(true),
    )
    .with_registry(registry_of(vec![Arc::new(SlowChecker::new(Duration::ZERO))]))
    .with_progress(progress.clone());
    manager.scan_all().await.unwrap();

    let events = progress.events();
    assert_eq!(events.len(), 5, "{:?}", events);
    assert_eq!(events[0], "started 3");
    for (i, event) in events[1..4].iter().enumerate() {
        assert!(
            event.starts_with(&format!("advanced {}/3 org/repo", i + 1)),
            "{}",
            event
        );
    }
    assert_eq!(events[4], "finished 3/3");
}
