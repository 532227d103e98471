//! Committed secrets and security policy

use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, Project};
use serde_json::json;
use std::path::Path;
use walkdir::WalkDir;

const SENSITIVE_NAMES: &[&str] = &[".env", "id_rsa", "id_dsa", "id_ecdsa", "id_ed25519", ".npmrc", ".pypirc"];
const SENSITIVE_EXTENSIONS: &[&str] = &["pem", "key", "p12", "pfx"];
const POLICY_FILES: &[&str] = &["SECURITY.md", ".github/SECURITY.md", "docs/SECURITY.md"];

pub struct SecurityChecker;

fn is_sensitive(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if SENSITIVE_NAMES.contains(&name) {
        return true;
    }
    // .env.local, .env.production; templates are fine
    if name.starts_with(".env.") && !name.ends_with(".example") && !name.ends_with(".sample") {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SENSITIVE_EXTENSIONS.contains(&ext))
}

impl SecurityChecker {
    fn sensitive_files(project: &Project) -> Vec<String> {
        let mut found: Vec<String> = WalkDir::new(project.path())
            .max_depth(4)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !(e.file_type().is_dir()
                        && matches!(
                            e.file_name().to_str(),
                            Some(".git" | "node_modules" | "target" | "venv" | ".venv")
                        ))
            })
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file() && is_sensitive(e.path()))
            .filter_map(|e| {
                e.path()
                    .strip_prefix(project.path())
                    .ok()
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect();
        found.sort();
        found
    }
}

impl Checker for SecurityChecker {
    fn name(&self) -> &'static str {
        "security"
    }

    fn description(&self) -> &'static str {
        "Checks for committed credentials and a security policy"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let sensitive = Self::sensitive_files(project);
        let policy = POLICY_FILES.iter().copied().find(|f| project.exists(f));
        let metadata = json!({ "sensitive_files": sensitive, "policy": policy });

        if !sensitive.is_empty() {
            let status = if sensitive.len() >= 3 {
                CheckStatus::Error
            } else {
                CheckStatus::Warning
            };
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    status,
                    "Potential security issues found",
                    format!(
                        "{} sensitive file(s) should not be committed: {}",
                        sensitive.len(),
                        sensitive.join(", ")
                    ),
                )
                .with_suggestions([
                    "Remove credentials from the repository and its history",
                    "Add sensitive files like .env to .gitignore",
                    "Rotate any keys that were committed",
                ])
                .with_metadata("security", metadata),
            ));
        }

        if policy.is_none() {
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Suggestion,
                    "No security policy",
                    "No sensitive files found, but there is no SECURITY.md describing how to report vulnerabilities.",
                )
                .with_suggestions(["Add a SECURITY.md with a disclosure process"])
                .with_metadata("security", metadata),
            ));
        }

        Ok(Some(
            CheckResult::new(
                self.name(),
                CheckStatus::Success,
                "Security check passed",
                "No committed credentials detected and a security policy is present.",
            )
            .with_metadata("security", metadata),
        ))
    }
}
