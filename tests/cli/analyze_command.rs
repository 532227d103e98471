//! `weekly analyze` end-to-end tests

use super::{stderr, stdout, weekly};
use crate::common::fixtures::make_cargo_repo;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_analyze_clean_project_exits_zero() {
    let dir = TempDir::new().unwrap();
    let project = make_cargo_repo(dir.path(), "tool");

    let output = weekly(&["analyze", project.to_str().unwrap()], dir.path());

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Weekly Project Analysis Report"));
    assert!(text.contains("Project: tool"));
}

#[test]
fn test_analyze_error_result_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("app");
    fs::create_dir_all(&project).unwrap();
    // A Python project with no tests at all
    fs::write(project.join("requirements.txt"), "requests\n").unwrap();
    fs::write(project.join("main.py"), "print('hi')\n").unwrap();

    let output = weekly(&["analyze", project.to_str().unwrap(), "--format", "json"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["results"]["testing"]["status"], "error");
    assert!(value["summary"]["errors"].as_u64().unwrap() >= 1);
}

#[test]
fn test_analyze_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let project = make_cargo_repo(dir.path(), "tool");
    let target = dir.path().join("reports/analysis.md");

    let output = weekly(
        &[
            "analyze",
            project.to_str().unwrap(),
            "--format",
            "markdown",
            "--output",
            target.to_str().unwrap(),
            "--no-suggestions",
        ],
        dir.path(),
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let report = fs::read_to_string(&target).unwrap();
    assert!(report.starts_with("# Project Analysis: tool"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_analyze_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let output = weekly(
        &["analyze", dir.path().join("nope").to_str().unwrap()],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist"), "{}", stderr(&output));
}
