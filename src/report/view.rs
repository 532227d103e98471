//! Template view models
//!
//! Flattened, display-ready data handed to the templates. Ordering and
//! grouping decisions live here so templates only iterate.

use crate::changelog::ChangeSummary;
use crate::checkers::{CheckResult, CheckStatus};
use crate::core::strings::title_case;
use crate::scanner::{ScanResult, ScanSummaryEntry};
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckView {
    pub name: String,
    pub title: String,
    pub status: CheckStatus,
    pub icon: &'static str,
    pub details: String,
    pub suggestions: Vec<String>,
    /// Pretty-printed checker metadata, absent when empty
    pub metadata: Option<String>,
}

impl CheckView {
    fn from_result(name: &str, result: &CheckResult) -> Self {
        let metadata = if result.metadata.is_empty() {
            None
        } else {
            serde_json::to_string_pretty(&result.metadata).ok()
        };
        Self {
            name: name.to_string(),
            title: result.title.clone(),
            status: result.status,
            icon: result.status.icon(),
            details: result.details.clone(),
            suggestions: result.suggestions.clone(),
            metadata,
        }
    }
}

/// Issues sharing one fix priority
#[derive(Debug, Clone, Serialize)]
pub struct PriorityGroup {
    pub priority: &'static str,
    pub label: &'static str,
    pub checks: Vec<CheckView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeCount {
    pub name: String,
    pub emoji: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeView {
    pub commits: usize,
    pub files: usize,
    pub additions: u64,
    pub deletions: u64,
    pub types: Vec<TypeCount>,
    pub top_files: Vec<crate::changelog::FileChurn>,
    pub recent: Vec<String>,
}

impl ChangeView {
    fn from_summary(summary: &ChangeSummary) -> Self {
        Self {
            commits: summary.commits.len(),
            files: summary.total_files,
            additions: summary.total_additions,
            deletions: summary.total_deletions,
            types: summary
                .commit_types_by_count()
                .into_iter()
                .map(|(t, count)| TypeCount {
                    name: title_case(&t.to_string()),
                    emoji: t.emoji(),
                    count,
                })
                .collect(),
            top_files: summary.most_changed_files.iter().take(5).cloned().collect(),
            recent: summary
                .commits
                .iter()
                .take(10)
                .map(|c| format!("{} {}", c.short_hash(), c.subject))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoReportView {
    pub label: String,
    pub organization: String,
    pub name: String,
    pub path: String,
    pub branch: String,
    pub remote_url: Option<String>,
    pub last_commit: String,
    pub generated_at: String,
    pub error: Option<String>,
    pub checks: Vec<CheckView>,
    pub not_applicable: Vec<String>,
    pub successes: usize,
    pub warnings: usize,
    pub suggestions: usize,
    pub errors: usize,
    pub priorities: Vec<PriorityGroup>,
    pub passing: Vec<String>,
    pub changes: Option<ChangeView>,
}

impl RepoReportView {
    pub fn from_result(result: &ScanResult) -> Self {
        let repo = &result.repository;
        let mut checks = Vec::new();
        let mut not_applicable = Vec::new();
        for (name, slot) in &result.results {
            match slot {
                Some(check) => checks.push(CheckView::from_result(name, check)),
                None => not_applicable.push(name.clone()),
            }
        }

        let count = |status: CheckStatus| checks.iter().filter(|c| c.status == status).count();
        let (successes, warnings, suggestions, errors) = (
            count(CheckStatus::Success),
            count(CheckStatus::Warning),
            count(CheckStatus::Suggestion),
            count(CheckStatus::Error),
        );

        let priorities = [
            (CheckStatus::Error, "Critical"),
            (CheckStatus::Warning, "Important"),
            (CheckStatus::Suggestion, "Nice to have"),
        ]
        .into_iter()
        .filter_map(|(status, label)| {
            let group: Vec<CheckView> = checks.iter().filter(|c| c.status == status).cloned().collect();
            let priority = status.priority()?;
            (!group.is_empty()).then_some(PriorityGroup {
                priority,
                label,
                checks: group,
            })
        })
        .collect();
        let passing = checks
            .iter()
            .filter(|c| c.status.is_success())
            .map(|c| c.name.clone())
            .collect();

        Self {
            label: repo.label(),
            organization: repo.organization().to_string(),
            name: repo.name().to_string(),
            path: repo.path().display().to_string(),
            branch: repo.branch().to_string(),
            remote_url: repo.remote_url().map(str::to_string),
            last_commit: repo.last_commit_display(),
            generated_at: result.scanned_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            error: result.error.clone(),
            successes,
            warnings,
            suggestions,
            errors,
            priorities,
            passing,
            not_applicable,
            changes: result.changes.as_ref().map(ChangeView::from_summary),
            checks,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView<'a> {
    pub generated_at: String,
    pub since: Option<String>,
    pub total: usize,
    pub with_issues: usize,
    pub failed: usize,
    pub entries: &'a [ScanSummaryEntry],
}

impl<'a> SummaryView<'a> {
    pub fn new(entries: &'a [ScanSummaryEntry], since: Option<DateTime<Local>>) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            since: since.map(|s| s.format("%Y-%m-%d").to_string()),
            total: entries.len(),
            with_issues: entries.iter().filter(|e| e.has_issues).count(),
            failed: entries.iter().filter(|e| e.failed).count(),
            entries,
        }
    }
}
