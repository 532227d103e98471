//! Repository trees for tests
//!
//! Repositories are plain directories with an empty `.git` marker; git calls
//! against them fail and metadata falls back to defaults. [`git_repo`] builds
//! a real repository when the `git` binary is available.

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Create `root/rel` with a repository marker and a README
pub fn make_repo(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.join(".git")).unwrap();
    fs::write(path.join("README.md"), format!("# {}\n", rel)).unwrap();
    path
}

/// A small Rust project inside a repository marker
pub fn make_cargo_repo(root: &Path, rel: &str) -> PathBuf {
    let path = make_repo(root, rel);
    fs::write(
        path.join("Cargo.toml"),
        "[package]\nname = \"fixture\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();
    fs::create_dir_all(path.join("src")).unwrap();
    fs::write(path.join("src/lib.rs"), "pub fn answer() -> u32 { 42 }\n").unwrap();
    path
}

/// Directory layout used by the discovery tests:
///
/// ```text
/// root/
///   top/            (repo, depth 1)
///   acme/widget/    (repo, depth 2)
///   acme/tools/cli/ (repo, depth 3)
///   plain/          (not a repo)
/// ```
pub fn make_tree(root: &Path) {
    make_repo(root, "top");
    make_repo(root, "acme/widget");
    make_repo(root, "acme/tools/cli");
    fs::create_dir_all(root.join("plain/src")).unwrap();
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(repo: &Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.arg("-C")
        .arg(repo)
        .args(["-c", "user.name=Fixture", "-c", "user.email=fixture@example.com"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Initialise a real repository with one commit per entry of `commits`
/// (subject, commit time)
pub fn git_repo(root: &Path, rel: &str, commits: &[(&str, DateTime<Local>)]) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(&path).unwrap();
    git(&path, &["init", "-q"], None);
    for (i, (subject, when)) in commits.iter().enumerate() {
        fs::write(path.join(format!("file{}.txt", i)), format!("{}\n", subject)).unwrap();
        git(&path, &["add", "."], None);
        git(&path, &["commit", "-q", "-m", subject], Some(&when.to_rfc3339()));
    }
    path
}
