//! Project documentation files

use crate::checkers::project::README_FILES;
use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, Project};
use serde_json::json;

const MIN_README_BYTES: u64 = 500;

const LICENSE_FILES: &[&str] = &["LICENSE", "LICENSE.txt", "LICENSE.md", "COPYING"];
const CHANGELOG_FILES: &[&str] = &["CHANGELOG.md", "CHANGELOG.rst", "CHANGELOG", "HISTORY.md"];
const CONTRIBUTING_FILES: &[&str] = &["CONTRIBUTING.md", "CONTRIBUTING.rst", "CONTRIBUTING"];

pub struct DocsChecker;

fn first_existing<'a>(project: &Project, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|f| project.exists(f))
}

/// Best-effort license family from the file text
pub(crate) fn detect_license(content: &str) -> Option<&'static str> {
    let content = content.to_lowercase();
    if content.contains("apache license") {
        Some("Apache-2.0")
    } else if content.contains("mit license") || content.contains("permission is hereby granted") {
        Some("MIT")
    } else if content.contains("gnu general public license") {
        Some("GPL")
    } else if content.contains("bsd") {
        Some("BSD")
    } else if content.contains("mozilla public license") {
        Some("MPL-2.0")
    } else {
        None
    }
}

impl Checker for DocsChecker {
    fn name(&self) -> &'static str {
        "docs"
    }

    fn description(&self) -> &'static str {
        "Checks for README, LICENSE, CHANGELOG, CONTRIBUTING and a docs directory"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let readme = first_existing(project, README_FILES);
        let license = first_existing(project, LICENSE_FILES);
        let changelog = first_existing(project, CHANGELOG_FILES);
        let contributing = first_existing(project, CONTRIBUTING_FILES);

        let mut missing = Vec::new();
        for (label, found) in [
            ("README", readme),
            ("LICENSE", license),
            ("CHANGELOG", changelog),
            ("CONTRIBUTING", contributing),
        ] {
            if found.is_none() {
                missing.push(label);
            }
        }

        let license_type = license
            .and_then(|f| project.file_content(f))
            .and_then(|content| detect_license(&content));
        let metadata = json!({
            "readme": readme,
            "license": license,
            "license_type": license_type,
            "changelog": changelog,
            "contributing": contributing,
            "docs_dir": project.has_docs(),
        });

        if readme.is_none() || license.is_none() {
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Warning,
                    "Missing important documentation files",
                    format!("Missing: {}", missing.join(", ")),
                )
                .with_suggestions(missing.iter().map(|doc| format!("Create a {} file", doc)))
                .with_metadata("files", metadata),
            ));
        }

        let readme_size = readme
            .and_then(|f| std::fs::metadata(project.path().join(f)).ok())
            .map(|m| m.len())
            .unwrap_or(0);
        if readme_size < MIN_README_BYTES {
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Suggestion,
                    "README could be more comprehensive",
                    format!(
                        "The README is {} bytes. Describe purpose, installation and usage.",
                        readme_size
                    ),
                )
                .with_suggestions([
                    "Expand the README with installation and usage examples",
                    "Include badges for build status and coverage",
                ])
                .with_metadata("files", metadata),
            ));
        }

        if !missing.is_empty() || !project.has_docs() {
            let mut suggestions: Vec<String> =
                missing.iter().map(|doc| format!("Create a {} file", doc)).collect();
            if !project.has_docs() {
                suggestions.push("Add a docs/ directory for longer-form documentation".to_string());
            }
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Suggestion,
                    "Documentation could be extended",
                    format!("README: {} bytes. Missing: {}", readme_size, missing.join(", ")),
                )
                .with_suggestions(suggestions)
                .with_metadata("files", metadata),
            ));
        }

        Ok(Some(
            CheckResult::new(
                self.name(),
                CheckStatus::Success,
                "Documentation looks good",
                format!(
                    "README: {} bytes, LICENSE: {}",
                    readme_size,
                    license_type.unwrap_or("unknown")
                ),
            )
            .with_metadata("files", metadata),
        ))
    }
}
