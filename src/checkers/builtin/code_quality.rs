//! Oversize source files and leftover work markers

use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, Project};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

const MAX_FILE_LINES: usize = 1000;
const MARKER_WARNING_THRESHOLD: usize = 20;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(TODO|FIXME|XXX)\b").unwrap_or_else(|_| panic!("Invalid Regex"))
});

pub struct CodeQualityChecker;

impl Checker for CodeQualityChecker {
    fn name(&self) -> &'static str {
        "code_quality"
    }

    fn description(&self) -> &'static str {
        "Checks for oversized source files and unresolved TODO/FIXME markers"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let sources = project.source_files();
        if sources.is_empty() {
            return Ok(None);
        }

        let mut large_files = Vec::new();
        let mut markers = 0usize;
        for relative in &sources {
            let Some(content) = project.file_content(&relative.to_string_lossy()) else {
                continue;
            };
            let lines = content.lines().count();
            if lines > MAX_FILE_LINES {
                large_files.push(json!({ "file": relative.display().to_string(), "lines": lines }));
            }
            markers += MARKER_RE.find_iter(&content).count();
        }

        let mut findings = Vec::new();
        let mut suggestions = Vec::new();
        if !large_files.is_empty() {
            findings.push(format!(
                "{} source file(s) exceed {} lines.",
                large_files.len(),
                MAX_FILE_LINES
            ));
            suggestions.push("Split large modules into smaller, focused units".to_string());
        }
        if markers > 0 {
            findings.push(format!("{} TODO/FIXME/XXX marker(s) found.", markers));
            suggestions.push("Resolve or file issues for outstanding TODO markers".to_string());
        }

        let status = if markers > MARKER_WARNING_THRESHOLD || large_files.len() > 3 {
            CheckStatus::Warning
        } else if findings.is_empty() {
            CheckStatus::Success
        } else {
            CheckStatus::Suggestion
        };
        let title = match status {
            CheckStatus::Success => "Code quality looks good",
            _ => "Code quality issues found",
        };
        let details = if findings.is_empty() {
            format!("Scanned {} source files.", sources.len())
        } else {
            format!("Scanned {} source files.\n{}", sources.len(), findings.join("\n"))
        };

        Ok(Some(
            CheckResult::new(self.name(), status, title, details)
                .with_suggestions(suggestions)
                .with_metadata("files_scanned", json!(sources.len()))
                .with_metadata("markers", json!(markers))
                .with_metadata("large_files", json!(large_files)),
        ))
    }
}
