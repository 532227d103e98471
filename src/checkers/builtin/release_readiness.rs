//! Version and changelog agreement

use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, Project};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

const CHANGELOG_FILES: &[&str] = &["CHANGELOG.md", "CHANGELOG.rst", "CHANGELOG", "HISTORY.md"];

static SETUP_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"version\s*=\s*['"]([^'"]+)['"]"#).unwrap_or_else(|_| panic!("Invalid Regex"))
});

pub struct ReleaseReadinessChecker;

impl ReleaseReadinessChecker {
    fn version(project: &Project) -> Option<String> {
        project.package_info().version.or_else(|| {
            project
                .setup_py()
                .and_then(|content| SETUP_VERSION_RE.captures(&content).map(|c| c[1].to_string()))
        })
    }
}

impl Checker for ReleaseReadinessChecker {
    fn name(&self) -> &'static str {
        "release_readiness"
    }

    fn description(&self) -> &'static str {
        "Checks that the current version is recorded in the changelog"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let Some(version) = Self::version(project) else {
            return Ok(None);
        };

        let changelog = CHANGELOG_FILES
            .iter()
            .copied()
            .find_map(|f| project.file_content(f).map(|content| (f, content)));
        let has_dist = project.is_dir("dist");

        let (status, title, suggestions) = match &changelog {
            None => (
                CheckStatus::Warning,
                "No changelog to release from",
                vec!["Add a CHANGELOG.md with an entry per release".to_string()],
            ),
            Some((file, content)) if !content.contains(&version) => (
                CheckStatus::Suggestion,
                "Changelog not updated for current version",
                vec![format!("Add an entry for {} to {}", version, file)],
            ),
            Some(_) => (CheckStatus::Success, "Ready for release", Vec::new()),
        };

        let details = format!(
            "Current version: {}\nChangelog updated: {}\nDist artifacts: {}",
            version,
            if status.is_success() { "yes" } else { "no" },
            if has_dist { "found" } else { "none" }
        );
        Ok(Some(
            CheckResult::new(self.name(), status, title, details)
                .with_suggestions(suggestions)
                .with_metadata("version", json!(version))
                .with_metadata("changelog", json!(changelog.map(|(f, _)| f))),
        ))
    }
}
