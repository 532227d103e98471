//! Dependency manifest and lockfile hygiene

use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, ManifestKind, Project};
use serde_json::json;

pub struct DependenciesChecker;

fn lockfiles(kind: ManifestKind) -> &'static [&'static str] {
    match kind {
        ManifestKind::Cargo => &["Cargo.lock"],
        ManifestKind::Npm => &["package-lock.json", "yarn.lock", "pnpm-lock.yaml"],
        ManifestKind::Pyproject => &["poetry.lock", "uv.lock", "pdm.lock", "requirements.txt"],
        ManifestKind::SetupPy | ManifestKind::Requirements => &[],
    }
}

/// A requirement is pinned when it carries any version specifier
fn is_pinned(requirement: &str) -> bool {
    let spec = requirement.split(';').next().unwrap_or(requirement);
    spec.starts_with('-') || ["==", ">=", "<=", "~=", "!=", ">", "<", "@"].iter().any(|op| spec.contains(op))
}

impl Checker for DependenciesChecker {
    fn name(&self) -> &'static str {
        "dependencies"
    }

    fn description(&self) -> &'static str {
        "Checks dependency manifests, lockfiles and version pinning"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let Some(kind) = project.build_manifest() else {
            return Ok(None);
        };

        let unpinned: Vec<&str> = project
            .requirements()
            .iter()
            .map(String::as_str)
            .filter(|req| !is_pinned(req))
            .collect();
        let expected_locks = lockfiles(kind);
        let has_lock = expected_locks.is_empty() || expected_locks.iter().any(|f| project.exists(f));

        let mut findings = Vec::new();
        let mut suggestions = Vec::new();
        if !has_lock {
            findings.push(format!(
                "No lockfile found (expected one of: {}).",
                expected_locks.join(", ")
            ));
            suggestions.push("Commit a lockfile so builds are reproducible".to_string());
        }
        if !unpinned.is_empty() {
            findings.push(format!(
                "{} requirement(s) without a version specifier: {}",
                unpinned.len(),
                unpinned.join(", ")
            ));
            suggestions.push("Pin dependency versions in requirements.txt".to_string());
        }

        let status = match (has_lock, unpinned.is_empty()) {
            (true, true) => CheckStatus::Success,
            (false, _) => CheckStatus::Warning,
            (true, false) => CheckStatus::Suggestion,
        };
        let title = if status.is_success() {
            "Dependencies are locked"
        } else {
            "Dependency management could be improved"
        };
        let details = if findings.is_empty() {
            format!("Manifest {} with a lockfile.", kind.file_name())
        } else {
            findings.join("\n")
        };

        Ok(Some(
            CheckResult::new(self.name(), status, title, details)
                .with_suggestions(suggestions)
                .with_metadata("manifest", json!(kind.file_name()))
                .with_metadata("unpinned", json!(unpinned)),
        ))
    }
}
