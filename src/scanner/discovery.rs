//! Repository Discovery
//!
//! Walks the scan root for directories carrying a `.git` marker, derives each
//! repository's organization and name from its position under the root, and
//! fills in lightweight git metadata.

use super::config::ScanConfig;
use super::error::{DiscoveryError, GitError, ScanError};
use super::git::run_git;
use super::types::{has_repository_marker, RepositoryDescriptor, RepositoryMetadata, REPOSITORY_MARKER};
use chrono::{DateTime, FixedOffset, Local};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// Discover repositories under `config.root`, sorted by path.
///
/// Only a missing root is an error; unreadable directories are skipped and
/// metadata failures degrade to defaults.
pub async fn discover(config: &ScanConfig) -> Result<Vec<RepositoryDescriptor>, ScanError> {
    let root = config.root.clone();
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            message: format!("Root directory does not exist: {}", root.display()),
            path: root,
        });
    }

    let recursive = config.recursive;
    let walk_root = root.clone();
    let candidates = tokio::task::spawn_blocking(move || find_repository_dirs(&walk_root, recursive))
        .await
        .map_err(|e| ScanError::Internal {
            message: format!("directory walk aborted: {}", e),
        })?;
    log::debug!("Found {} repository markers under {}", candidates.len(), root.display());

    let timeout = config.git_timeout;
    let descriptors: Vec<Result<RepositoryDescriptor, DiscoveryError>> = stream::iter(candidates)
        .map(|path| {
            let root = root.as_path();
            async move {
                let (organization, name) = derive_identity(root, &path);
                let metadata = read_metadata(&path, timeout).await;
                RepositoryDescriptor::new(path, organization, name, metadata)
            }
        })
        .buffered(config.jobs.max(1))
        .collect()
        .await;

    let mut found = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        match descriptor {
            Ok(descriptor) if passes_since(descriptor.last_commit(), config.since) => found.push(descriptor),
            Ok(descriptor) => {
                log::debug!("Skipping {}: no commits since cutoff", descriptor.label());
            }
            Err(e) => log::warn!("Skipping repository: {}", e),
        }
    }
    Ok(found)
}

/// Directories under `root` that carry a repository marker.
///
/// Descent stops at each repository. Without `recursive`, only `root` and its
/// direct children are considered.
pub fn find_repository_dirs(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut found = Vec::new();
    let mut entries = walker.into_iter();
    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!(
                    "Skipping unreadable directory {}: {}",
                    e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                    e
                );
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name() == REPOSITORY_MARKER {
            entries.skip_current_dir();
            continue;
        }
        if has_repository_marker(entry.path()) {
            found.push(entry.path().to_path_buf());
            entries.skip_current_dir();
        }
    }
    found.sort();
    found
}

/// Organization and name from the repository's position under `root`
pub fn derive_identity(root: &Path, repo: &Path) -> (String, String) {
    let segments: Vec<String> = repo
        .strip_prefix(root)
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    match segments.as_slice() {
        [] => {
            let name = root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.display().to_string());
            (String::new(), name)
        }
        [name] => (String::new(), name.clone()),
        [organization, .., name] => (organization.clone(), name.clone()),
    }
}

/// Date-only inclusion test: the last commit's local calendar date must be on
/// or after the cutoff's. Repositories without commits never pass a cutoff.
pub fn passes_since(last_commit: Option<DateTime<FixedOffset>>, since: Option<DateTime<Local>>) -> bool {
    match (since, last_commit) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(since), Some(last)) => last.with_timezone(&Local).date_naive() >= since.date_naive(),
    }
}

/// Committer date as printed by `git log --format=%cI`
pub fn parse_commit_date(raw: &str) -> Result<DateTime<FixedOffset>, GitError> {
    DateTime::parse_from_rfc3339(raw.trim()).map_err(|e| GitError::Parse {
        args: "log -1 --format=%cI".to_string(),
        message: format!("unparsable commit date '{}': {}", raw.trim(), e),
    })
}

/// Branch, last commit time and origin URL; each falls back independently
pub async fn read_metadata(repo: &Path, timeout: Duration) -> RepositoryMetadata {
    let mut metadata = RepositoryMetadata::default();

    match run_git(repo, &["rev-parse", "--abbrev-ref", "HEAD"], timeout).await {
        Ok(branch) if !branch.is_empty() => metadata.branch = branch,
        Ok(_) => {}
        Err(e) => log::debug!("{}: branch unavailable: {}", repo.display(), e),
    }

    match run_git(repo, &["log", "-1", "--format=%cI"], timeout).await {
        Ok(date) if !date.is_empty() => match parse_commit_date(&date) {
            Ok(ts) => metadata.last_commit = Some(ts),
            Err(e) => log::debug!("{}: {}", repo.display(), e),
        },
        Ok(_) => {}
        Err(e) => log::debug!("{}: last commit unavailable: {}", repo.display(), e),
    }

    match run_git(repo, &["remote", "get-url", "origin"], timeout).await {
        Ok(url) if !url.is_empty() => metadata.remote_url = Some(url),
        Ok(_) => {}
        Err(e) => log::debug!("{}: no origin remote: {}", repo.display(), e),
    }

    metadata
}
