//! Global flags: version, configuration file, logging

use super::{stderr, stdout, weekly};
use crate::common::fixtures::make_repo;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_version_includes_build_metadata() {
    let dir = TempDir::new().unwrap();
    let output = weekly(&["--version"], dir.path());
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains(env!("CARGO_PKG_VERSION")), "{}", text);

    let output = weekly(&["scan", "--version"], dir.path());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_explicit_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = weekly(
        &["--config-file", dir.path().join("absent.toml").to_str().unwrap(), "scan", "."],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("does not exist"), "{}", stderr(&output));
}

#[test]
fn test_config_file_supplies_output_directory() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    make_repo(&root, "widget");
    let out = dir.path().join("configured");
    let config = dir.path().join("weekly.toml");
    // Marker-only repositories have no commits, so the scan finds nothing;
    // the debug line still shows the resolved output directory
    fs::write(
        &config,
        format!("output = {:?}\njobs = 2\n", out.to_string_lossy()),
    )
    .unwrap();

    let output = weekly(
        &["-c", config.to_str().unwrap(), "scan", root.to_str().unwrap(), "-v"],
        dir.path(),
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains(&format!("Output: {}", out.display())), "{}", stderr(&output));
}

#[test]
fn test_malformed_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("weekly.toml");
    fs::write(&config, "jobs = [").unwrap();

    let output = weekly(&["-c", config.to_str().unwrap(), "scan", "."], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error parsing configuration file"));
}

#[test]
fn test_json_log_format() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("src");
    fs::create_dir_all(&root).unwrap();

    let output = weekly(
        &["--log-format", "json", "scan", root.to_str().unwrap(), "-o", dir.path().join("out").to_str().unwrap()],
        dir.path(),
    );
    assert!(output.status.success());
    let first = stderr(&output).lines().next().map(str::to_string).unwrap_or_default();
    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["level"], "INF");
}
