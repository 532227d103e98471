//! Artifact placement: timestamped reports, latest pointers and the summary

use crate::common::fakes::{registry_of, FixedChecker};
use crate::common::fixtures::{make_cargo_repo, make_repo};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use weekly::checkers::CheckStatus;
use weekly::scanner::api::{ReportFormat, ScanConfig, ScanError, ScanManager};

fn timestamped(dir: &Path, ext: &str) -> Vec<String> {
    let suffix = format!(".{}", ext);
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(&suffix) && !name.starts_with("latest"))
        // "x.llm.md" also ends with ".md"
        .filter(|name| ext == "llm.md" || !name.ends_with(".llm.md"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_latest_points_at_newest_report_after_rescan() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_cargo_repo(&root, "acme/widget");
    let out = dir.path().join("out");
    let manager = ScanManager::new(ScanConfig::new(&root, &out));

    manager.scan_all().await.unwrap();
    let results = manager.scan_all().await.unwrap();

    let repo_dir = out.join("acme/widget");
    for ext in ["html", "md", "llm.md"] {
        let reports = timestamped(&repo_dir, ext);
        assert_eq!(reports.len(), 2, "{}: {:?}", ext, reports);
        let newest = fs::read_to_string(repo_dir.join(reports.last().unwrap())).unwrap();
        let latest = fs::read_to_string(repo_dir.join(format!("latest.{}", ext))).unwrap();
        assert_eq!(latest, newest, "latest.{} is stale", ext);
    }
    assert_eq!(
        results[0].report_path.as_deref(),
        Some(repo_dir.join(timestamped(&repo_dir, "html").pop().unwrap()).as_path())
    );
    // No staging files left behind
    assert!(fs::read_dir(&repo_dir)
        .unwrap()
        .all(|e| !e.unwrap().file_name().to_string_lossy().ends_with(".tmp")));
}

#[tokio::test]
async fn test_summary_is_sorted_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    for rel in ["Zeta/a", "alpha/b", "c", "beta/D"] {
        make_repo(&root, rel);
    }
    let out = dir.path().join("out");
    let manager = ScanManager::new(ScanConfig::new(&root, &out).with_format(ReportFormat::Json))
        .with_registry(registry_of(vec![Arc::new(FixedChecker {
            name: "ok",
            status: CheckStatus::Success,
        })]));

    manager.scan_all().await.unwrap();

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    let labels: Vec<String> = summary["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            let org = e["organization"].as_str().unwrap();
            let name = e["name"].as_str().unwrap();
            if org.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", org, name)
            }
        })
        .collect();
    assert_eq!(labels, vec!["c", "alpha/b", "beta/D", "Zeta/a"]);
    assert_eq!(summary["total"], 4);
    assert_eq!(summary["entries"][1]["report_path"], "alpha/b/latest.html");
    assert!(out.join("alpha/b/latest.json").exists());
}

#[tokio::test]
async fn test_markdown_format_adds_summary_markdown() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repo(&root, "widget");
    let out = dir.path().join("out");

    ScanManager::new(ScanConfig::new(&root, &out).with_format(ReportFormat::Markdown))
        .scan_all()
        .await
        .unwrap();

    let summary = fs::read_to_string(out.join("summary.md")).unwrap();
    assert!(summary.contains("widget/latest.md"));
    assert!(!out.join("summary.json").exists());
    assert!(!out.join("widget/latest.json").exists());
}

#[tokio::test]
async fn test_no_repositories_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("empty");
    fs::create_dir_all(root.join("not-a-repo")).unwrap();
    let out = dir.path().join("out");

    let results = ScanManager::new(ScanConfig::new(&root, &out))
        .scan_all()
        .await
        .unwrap();

    assert!(results.is_empty());
    assert!(!out.exists());
}

#[tokio::test]
async fn test_missing_root_is_a_setup_error() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let err = ScanManager::new(ScanConfig::new(dir.path().join("missing"), &out))
        .scan_all()
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::RootNotFound { .. }));
    assert!(!out.exists());
}
