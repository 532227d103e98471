//! Package metadata completeness

use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, ManifestKind, Project};
use serde_json::json;

pub struct PackagingChecker;

impl Checker for PackagingChecker {
    fn name(&self) -> &'static str {
        "packaging"
    }

    fn description(&self) -> &'static str {
        "Checks that the package manifest declares name, version, description and license"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let Some(kind) = project.build_manifest() else {
            return Ok(None);
        };
        if kind == ManifestKind::Requirements {
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Suggestion,
                    "No package manifest",
                    "Only requirements.txt was found; the project cannot be installed as a package.",
                )
                .with_suggestions(["Add a pyproject.toml with [project] metadata"]),
            ));
        }

        let info = project.package_info();
        let missing: Vec<&str> = [
            ("name", info.name.is_none()),
            ("version", info.version.is_none()),
            ("description", info.description.is_none()),
            ("license", info.license.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        let metadata = json!(info);

        if missing.is_empty() {
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Success,
                    "Package metadata complete",
                    format!("{} declares all core metadata fields.", kind.file_name()),
                )
                .with_metadata("package", metadata),
            ));
        }

        let status = if missing.contains(&"name") || missing.contains(&"version") {
            CheckStatus::Warning
        } else {
            CheckStatus::Suggestion
        };
        Ok(Some(
            CheckResult::new(
                self.name(),
                status,
                "Incomplete package metadata",
                format!("{} is missing: {}", kind.file_name(), missing.join(", ")),
            )
            .with_suggestions(
                missing
                    .iter()
                    .map(|field| format!("Declare '{}' in {}", field, kind.file_name())),
            )
            .with_metadata("package", metadata),
        ))
    }
}
