//! `weekly scan` end-to-end tests

use super::{stderr, stdout, weekly};
use crate::common::fixtures::{git_available, git_repo, make_repo};
use chrono::{Duration, Local};
use tempfile::TempDir;

#[test]
fn test_scan_missing_root_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    let out = dir.path().join("out");

    let output = weekly(
        &["scan", missing.to_str().unwrap(), "-o", out.to_str().unwrap()],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Root directory does not exist"), "{}", stderr(&output));
    assert!(!out.exists());
}

#[test]
fn test_scan_without_repositories_succeeds() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    std::fs::create_dir_all(root.join("plain")).unwrap();
    let out = dir.path().join("out");

    let output = weekly(
        &["scan", root.to_str().unwrap(), "-o", out.to_str().unwrap()],
        dir.path(),
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("No repositories found"));
    assert!(!out.exists());
}

#[test]
fn test_scan_rejects_unparsable_since() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repo(&root, "widget");

    let output = weekly(
        &["scan", root.to_str().unwrap(), "--since", "next month"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid date format"), "{}", stderr(&output));
}

#[test]
fn test_scan_rejects_out_of_range_since() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repo(&root, "widget");

    for since in ["1000000000000 days", "99999999999 years ago"] {
        let output = weekly(&["scan", root.to_str().unwrap(), "--since", since], dir.path());
        assert_eq!(output.status.code(), Some(1), "{}: {}", since, stderr(&output));
    }
}

#[test]
fn test_scan_rejects_zero_jobs() {
    let dir = TempDir::new().unwrap();
    let output = weekly(&["scan", ".", "--jobs", "0"], dir.path());
    assert!(!output.status.success());
}

#[test]
fn test_scan_writes_reports_for_recent_repositories() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    let now = Local::now();
    git_repo(&root, "acme/fresh", &[("feat: add widget", now - Duration::hours(2))]);
    git_repo(&root, "acme/stale", &[("chore: init", now - Duration::days(40))]);
    let out = dir.path().join("out");

    let output = weekly(
        &["scan", root.to_str().unwrap(), "-o", out.to_str().unwrap(), "--format", "json"],
        dir.path(),
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Scanned 1 repositories"), "{}", text);
    assert!(text.contains("acme/fresh"), "{}", text);
    assert!(out.join("summary.html").exists());
    assert!(out.join("summary.json").exists());
    assert!(out.join("acme/fresh/latest.html").exists());
    assert!(out.join("acme/fresh/latest.llm.md").exists());
    assert!(!out.join("acme/stale").exists());

    let changelog = std::fs::read_to_string(out.join("acme/fresh/changelog.md")).unwrap();
    assert!(changelog.contains("add widget"), "{}", changelog);
}

#[test]
fn test_scan_since_option_widens_window() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    git_repo(&root, "older", &[("fix: bug", Local::now() - Duration::days(20))]);
    let out = dir.path().join("out");

    let output = weekly(
        &["scan", root.to_str().unwrap(), "-o", out.to_str().unwrap(), "--since", "30 days ago", "--summary-only"],
        dir.path(),
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(out.join("summary.html").exists());
    assert!(!out.join("older").exists());
}
