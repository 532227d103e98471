//! Scan configuration context
//!
//! Passed explicitly to discovery, the orchestrator and the artifact writer.

use super::error::ScanError;
use super::git::DEFAULT_GIT_TIMEOUT;
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use strum_macros::{Display, EnumString};

pub const DEFAULT_JOBS: usize = 4;
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Extra artifact format requested on top of the always-written HTML/Markdown
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
    Markdown,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub output_dir: PathBuf,
    /// Inclusion cutoff (calendar date) and changelog window start (full timestamp)
    pub since: Option<DateTime<Local>>,
    pub recursive: bool,
    pub jobs: usize,
    pub format: ReportFormat,
    pub summary_only: bool,
    pub git_timeout: Duration,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir: output_dir.into(),
            since: None,
            recursive: true,
            jobs: DEFAULT_JOBS,
            format: ReportFormat::default(),
            summary_only: false,
            git_timeout: DEFAULT_GIT_TIMEOUT,
        }
    }

    pub fn with_since(mut self, since: Option<DateTime<Local>>) -> Self {
        self.since = since;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_summary_only(mut self, summary_only: bool) -> Self {
        self.summary_only = summary_only;
        self
    }

    pub fn with_git_timeout(mut self, timeout: Duration) -> Self {
        self.git_timeout = timeout;
        self
    }

    /// Check setup preconditions and canonicalize the root
    pub fn validate(mut self) -> Result<Self, ScanError> {
        if self.jobs == 0 {
            return Err(ScanError::Configuration {
                message: "--jobs must be at least 1".to_string(),
            });
        }
        if self.git_timeout.is_zero() {
            return Err(ScanError::Configuration {
                message: "--git-timeout must be at least 1 second".to_string(),
            });
        }
        if !self.root.is_dir() {
            return Err(ScanError::RootNotFound {
                message: format!("Root directory does not exist: {}", self.root.display()),
                path: self.root,
            });
        }
        self.root = self
            .root
            .canonicalize()
            .map_err(|e| ScanError::RootNotFound {
                message: format!("Cannot resolve root directory {}: {}", self.root.display(), e),
                path: self.root.clone(),
            })?;
        Ok(self)
    }
}
