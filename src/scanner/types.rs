//! Scanner Types
//!
//! Repository descriptors, per-repository scan bundles and summary rows.

use super::error::DiscoveryError;
use crate::changelog::ChangeSummary;
use crate::checkers::{CheckResults, CheckStatus};
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Branch reported when the current branch cannot be determined
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Marker entry identifying a git working tree
pub const REPOSITORY_MARKER: &str = ".git";

pub fn has_repository_marker(path: &Path) -> bool {
    path.join(REPOSITORY_MARKER).exists()
}

/// Best-effort git metadata; failures leave fields at their defaults
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryMetadata {
    pub branch: String,
    pub last_commit: Option<DateTime<FixedOffset>>,
    pub remote_url: Option<String>,
}

impl Default for RepositoryMetadata {
    fn default() -> Self {
        Self {
            branch: UNKNOWN_BRANCH.to_string(),
            last_commit: None,
            remote_url: None,
        }
    }
}

/// One discovered repository. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryDescriptor {
    path: PathBuf,
    organization: String,
    name: String,
    metadata: RepositoryMetadata,
}

impl RepositoryDescriptor {
    /// Fails unless `path` exists and carries a repository marker
    pub fn new(
        path: impl Into<PathBuf>,
        organization: impl Into<String>,
        name: impl Into<String>,
        metadata: RepositoryMetadata,
    ) -> Result<Self, DiscoveryError> {
        let path = path.into();
        if !path.exists() {
            return Err(DiscoveryError::NotFound { path });
        }
        if !has_repository_marker(&path) {
            return Err(DiscoveryError::NotARepository { path });
        }
        Ok(Self {
            path,
            organization: organization.into(),
            name: name.into(),
            metadata,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branch(&self) -> &str {
        &self.metadata.branch
    }

    pub fn last_commit(&self) -> Option<DateTime<FixedOffset>> {
        self.metadata.last_commit
    }

    pub fn remote_url(&self) -> Option<&str> {
        self.metadata.remote_url.as_deref()
    }

    /// `org/name`, or just `name` without an organization
    pub fn label(&self) -> String {
        crate::core::strings::repo_label(&self.organization, &self.name)
    }

    /// Last commit in local time, or "never"
    pub fn last_commit_display(&self) -> String {
        self.metadata
            .last_commit
            .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string())
    }
}

/// Everything one scan unit produced for one repository
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub repository: RepositoryDescriptor,
    pub results: CheckResults,
    /// Set when the unit itself failed (changelog or rendering); results may be partial
    pub error: Option<String>,
    pub changes: Option<ChangeSummary>,
    pub scanned_at: DateTime<Local>,
    /// Timestamped HTML report, when one was written
    pub report_path: Option<PathBuf>,
}

impl ScanResult {
    pub fn new(repository: RepositoryDescriptor) -> Self {
        Self {
            repository,
            results: CheckResults::new(),
            error: None,
            changes: None,
            scanned_at: Local::now(),
            report_path: None,
        }
    }

    /// Record a unit-level failure, keeping earlier ones
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(match self.error.take() {
            Some(existing) => format!("{}; {}", existing, message),
            None => message,
        });
    }

    /// Count of present results per status
    pub fn status_counts(&self) -> BTreeMap<CheckStatus, usize> {
        let mut counts = BTreeMap::new();
        for result in self.results.values().flatten() {
            *counts.entry(result.status).or_insert(0) += 1;
        }
        counts
    }

    /// True when any result is not a success or the unit failed
    pub fn has_issues(&self) -> bool {
        self.error.is_some()
            || self
                .results
                .values()
                .flatten()
                .any(|result| !result.status.is_success())
    }

    pub fn has_errors(&self) -> bool {
        self.results
            .values()
            .flatten()
            .any(|result| result.status == CheckStatus::Error)
    }
}

/// One row of the cross-repository summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSummaryEntry {
    pub organization: String,
    pub name: String,
    pub has_issues: bool,
    pub failed: bool,
    pub error: Option<String>,
    pub last_commit: String,
    pub branch: String,
    pub successes: usize,
    pub warnings: usize,
    pub suggestions: usize,
    pub errors: usize,
    /// Link to the repository's `latest.html`, relative to the summary
    pub report_path: Option<String>,
}

impl ScanSummaryEntry {
    pub fn from_result(result: &ScanResult, with_report: bool) -> Self {
        let repo = &result.repository;
        let counts = result.status_counts();
        let count = |status| counts.get(&status).copied().unwrap_or(0);
        let report_path = with_report.then(|| {
            if repo.organization().is_empty() {
                format!("{}/latest.html", repo.name())
            } else {
                format!("{}/{}/latest.html", repo.organization(), repo.name())
            }
        });
        Self {
            organization: repo.organization().to_string(),
            name: repo.name().to_string(),
            has_issues: result.has_issues(),
            failed: result.error.is_some(),
            error: result.error.clone(),
            last_commit: repo.last_commit_display(),
            branch: repo.branch().to_string(),
            successes: count(CheckStatus::Success),
            warnings: count(CheckStatus::Warning),
            suggestions: count(CheckStatus::Suggestion),
            errors: count(CheckStatus::Error),
            report_path,
        }
    }

    pub fn label(&self) -> String {
        crate::core::strings::repo_label(&self.organization, &self.name)
    }

    fn sort_key(&self) -> (String, String) {
        (self.organization.to_lowercase(), self.name.to_lowercase())
    }
}

/// Order entries by (organization, name), case-insensitively
pub fn sort_summary_entries(entries: &mut [ScanSummaryEntry]) {
    entries.sort_by_cached_key(|entry| entry.sort_key());
}
