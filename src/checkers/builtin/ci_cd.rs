//! Continuous integration configuration and deploy steps

use crate::checkers::project::CI_PATHS;
use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, Project};
use serde_json::json;

const DEPLOY_KEYWORDS: &[&str] = &[
    "deploy",
    "publish",
    "release",
    "cargo publish",
    "twine upload",
    "npm publish",
];

pub struct CiCdChecker;

impl CiCdChecker {
    fn workflow_files(project: &Project) -> Vec<String> {
        let mut files = Vec::new();
        for pattern in [".github/workflows/*.yml", ".github/workflows/*.yaml"] {
            let full = project.path().join(pattern);
            let Ok(paths) = glob::glob(&full.to_string_lossy()) else {
                continue;
            };
            files.extend(paths.filter_map(Result::ok).filter_map(|p| {
                p.strip_prefix(project.path())
                    .ok()
                    .map(|rel| rel.to_string_lossy().into_owned())
            }));
        }
        for (path, _) in CI_PATHS.iter().skip(1) {
            if project.exists(path) && !project.is_dir(path) {
                files.push(path.to_string());
            }
        }
        files.sort();
        files
    }
}

impl Checker for CiCdChecker {
    fn name(&self) -> &'static str {
        "ci_cd"
    }

    fn description(&self) -> &'static str {
        "Checks for CI configuration and automated deployment"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let systems: Vec<&str> = CI_PATHS
            .iter()
            .filter(|(path, _)| project.exists(path))
            .map(|(_, name)| *name)
            .collect();

        if systems.is_empty() {
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Warning,
                    "No CI configuration found",
                    "No continuous integration configuration was detected.",
                )
                .with_suggestions([
                    "Add a GitHub Actions workflow under .github/workflows",
                    "Run tests and linters on every push",
                ]),
            ));
        }

        let workflows = Self::workflow_files(project);
        let deploys = workflows.iter().any(|file| {
            project.file_content(file).is_some_and(|content| {
                let content = content.to_lowercase();
                DEPLOY_KEYWORDS.iter().any(|kw| content.contains(kw))
            })
        });
        let metadata = json!({ "systems": systems, "workflows": workflows, "deploys": deploys });

        if !deploys {
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Suggestion,
                    "CI configured without deployment",
                    format!("CI: {}. No publish or deploy step found.", systems.join(", ")),
                )
                .with_suggestions(["Automate releases with a publish job triggered by tags"])
                .with_metadata("ci", metadata),
            ));
        }

        Ok(Some(
            CheckResult::new(
                self.name(),
                CheckStatus::Success,
                "CI/CD configured",
                format!("CI: {} with automated deployment.", systems.join(", ")),
            )
            .with_metadata("ci", metadata),
        ))
    }
}
