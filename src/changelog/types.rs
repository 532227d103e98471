//! Commit and change-summary types

use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

/// Conventional-commit category of a commit subject
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Refactor,
    Docs,
    Style,
    Test,
    Chore,
    Perf,
    Ci,
    Build,
    Other,
}

impl CommitType {
    pub fn emoji(self) -> &'static str {
        match self {
            CommitType::Feat => "✨",
            CommitType::Fix => "🐛",
            CommitType::Refactor => "♻️",
            CommitType::Docs => "📚",
            CommitType::Style => "💄",
            CommitType::Test => "✅",
            CommitType::Chore => "🔧",
            CommitType::Perf => "⚡",
            CommitType::Ci => "👷",
            CommitType::Build => "📦",
            CommitType::Other => "📝",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitInfo {
    pub hash: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub subject: String,
    pub files_changed: Vec<String>,
    pub additions: u64,
    pub deletions: u64,
    pub commit_type: CommitType,
}

impl CommitInfo {
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Number of commits that touched a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChurn {
    pub path: String,
    pub commits: usize,
}

/// Aggregated change activity of one repository over a time window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSummary {
    pub since: DateTime<Local>,
    /// Newest first
    pub commits: Vec<CommitInfo>,
    pub total_files: usize,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub commit_types: BTreeMap<CommitType, usize>,
    pub most_changed_files: Vec<FileChurn>,
}

impl ChangeSummary {
    pub fn empty(since: DateTime<Local>) -> Self {
        Self {
            since,
            commits: Vec::new(),
            total_files: 0,
            total_additions: 0,
            total_deletions: 0,
            commit_types: BTreeMap::new(),
            most_changed_files: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Commit types ordered by count, most frequent first; ties by type order
    pub fn commit_types_by_count(&self) -> Vec<(CommitType, usize)> {
        let mut types: Vec<(CommitType, usize)> =
            self.commit_types.iter().map(|(t, n)| (*t, *n)).collect();
        types.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        types
    }
}
