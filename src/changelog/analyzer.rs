//! Git-backed change analysis

use super::render::render_changelog_markdown;
use super::types::{ChangeSummary, CommitInfo, CommitType, FileChurn};
use crate::scanner::error::GitError;
use crate::scanner::git::{run_git, DEFAULT_GIT_TIMEOUT};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

const MOST_CHANGED_LIMIT: usize = 10;

// Record and field separators for the log format
const RS: char = '\u{1e}';
const FS: char = '\u{1f}';

static CONVENTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(feat|feature|fix|bugfix|refactor|docs|style|test|chore|perf|ci|build)(\([^)]*\))?!?:")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to parse commit record '{record}': {message}")]
    Parse { record: String, message: String },
}

/// Produces a change summary for a repository and renders it as text
#[async_trait]
pub trait ChangeAnalyzer: Send + Sync {
    /// Commits in `[since, now]`; `since` is compared as a full timestamp
    async fn summarize(&self, repo: &Path, since: DateTime<Local>) -> Result<ChangeSummary, ChangelogError>;

    fn render_changelog(&self, summary: &ChangeSummary) -> String {
        render_changelog_markdown(summary)
    }
}

/// Classify a commit subject by conventional prefix, then by keywords
pub fn classify_commit(subject: &str) -> CommitType {
    if let Some(caps) = CONVENTIONAL_RE.captures(subject) {
        return match caps[1].to_lowercase().as_str() {
            "feat" | "feature" => CommitType::Feat,
            "fix" | "bugfix" => CommitType::Fix,
            "refactor" => CommitType::Refactor,
            "docs" => CommitType::Docs,
            "style" => CommitType::Style,
            "test" => CommitType::Test,
            "chore" => CommitType::Chore,
            "perf" => CommitType::Perf,
            "ci" => CommitType::Ci,
            _ => CommitType::Build,
        };
    }

    let lower = subject.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    if has_any(&["add", "create", "new", "implement"]) {
        CommitType::Feat
    } else if has_any(&["fix", "bug", "error", "issue"]) {
        CommitType::Fix
    } else if has_any(&["update", "change", "modify", "remove", "delete", "clean"]) {
        CommitType::Refactor
    } else {
        CommitType::Other
    }
}

/// Analyzer running `git log --numstat` in the repository
#[derive(Debug, Clone)]
pub struct GitChangeAnalyzer {
    timeout: Duration,
}

impl GitChangeAnalyzer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for GitChangeAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_TIMEOUT)
    }
}

#[async_trait]
impl ChangeAnalyzer for GitChangeAnalyzer {
    async fn summarize(&self, repo: &Path, since: DateTime<Local>) -> Result<ChangeSummary, ChangelogError> {
        let since_arg = format!("--since={}", since.to_rfc3339());
        let format_arg = format!("--pretty=format:{}%H{}%an{}%aI{}%s", RS, FS, FS, FS);
        let output = run_git(repo, &["log", &since_arg, &format_arg, "--numstat"], self.timeout).await?;
        let commits = parse_log(&output)?;
        log::debug!("{} commits since {} in {}", commits.len(), since, repo.display());
        Ok(summarize_commits(since, commits))
    }
}

/// Parse `git log` output produced with the separator format above
pub(crate) fn parse_log(output: &str) -> Result<Vec<CommitInfo>, ChangelogError> {
    let mut commits = Vec::new();
    for record in output.split(RS).filter(|r| !r.trim().is_empty()) {
        let mut lines = record.lines();
        let header = lines.next().unwrap_or_default();
        let fields: Vec<&str> = header.splitn(4, FS).collect();
        let [hash, author, date, subject] = fields[..] else {
            return Err(ChangelogError::Parse {
                record: header.to_string(),
                message: "expected 4 fields".to_string(),
            });
        };
        let date = DateTime::parse_from_rfc3339(date).map_err(|e| ChangelogError::Parse {
            record: header.to_string(),
            message: e.to_string(),
        })?;

        let mut files_changed = Vec::new();
        let (mut additions, mut deletions) = (0u64, 0u64);
        for line in lines.filter(|l| !l.trim().is_empty()) {
            let mut parts = line.splitn(3, '\t');
            let (Some(added), Some(removed), Some(path)) = (parts.next(), parts.next(), parts.next()) else {
                continue;
            };
            // Binary files report "-"
            additions += added.parse::<u64>().unwrap_or(0);
            deletions += removed.parse::<u64>().unwrap_or(0);
            files_changed.push(path.to_string());
        }

        commits.push(CommitInfo {
            hash: hash.to_string(),
            author: author.to_string(),
            date,
            subject: subject.to_string(),
            files_changed,
            additions,
            deletions,
            commit_type: classify_commit(subject),
        });
    }
    Ok(commits)
}

pub(crate) fn summarize_commits(since: DateTime<Local>, commits: Vec<CommitInfo>) -> ChangeSummary {
    if commits.is_empty() {
        return ChangeSummary::empty(since);
    }

    let mut commit_types = BTreeMap::new();
    let mut churn: HashMap<&str, usize> = HashMap::new();
    let mut distinct: HashSet<&str> = HashSet::new();
    for commit in &commits {
        *commit_types.entry(commit.commit_type).or_insert(0) += 1;
        for file in &commit.files_changed {
            *churn.entry(file.as_str()).or_insert(0) += 1;
            distinct.insert(file.as_str());
        }
    }

    let mut most_changed: Vec<FileChurn> = churn
        .into_iter()
        .map(|(path, commits)| FileChurn {
            path: path.to_string(),
            commits,
        })
        .collect();
    most_changed.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.path.cmp(&b.path)));
    most_changed.truncate(MOST_CHANGED_LIMIT);

    ChangeSummary {
        since,
        total_files: distinct.len(),
        total_additions: commits.iter().map(|c| c.additions).sum(),
        total_deletions: commits.iter().map(|c| c.deletions).sum(),
        commit_types,
        most_changed_files: most_changed,
        commits,
    }
}
