//! Test suite and test configuration presence

use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, ManifestKind, Project};
use serde_json::json;

pub struct TestingChecker;

impl TestingChecker {
    fn has_test_config(project: &Project) -> bool {
        if ["pytest.ini", "tox.ini", "jest.config.js", "vitest.config.ts", ".nextest.toml"]
            .iter()
            .any(|f| project.exists(f))
        {
            return true;
        }
        if project
            .pyproject()
            .and_then(|p| p.get("tool"))
            .and_then(|tool| tool.get("pytest"))
            .is_some()
        {
            return true;
        }
        project
            .package_json()
            .and_then(|p| p.get("scripts"))
            .and_then(|scripts| scripts.get("test"))
            .is_some()
    }

    /// Rust keeps unit tests inline, so any `#[cfg(test)]` counts as a suite
    fn has_inline_tests(project: &Project) -> bool {
        project.files_with_extensions(&["rs"]).iter().any(|file| {
            project
                .file_content(&file.to_string_lossy())
                .is_some_and(|content| content.contains("#[cfg(test)]") || content.contains("#[test]"))
        })
    }
}

impl Checker for TestingChecker {
    fn name(&self) -> &'static str {
        "testing"
    }

    fn description(&self) -> &'static str {
        "Checks for a test suite and test runner configuration"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let Some(kind) = project.build_manifest() else {
            return Ok(None);
        };

        let has_tests = project.has_tests()
            || (kind == ManifestKind::Cargo && Self::has_inline_tests(project));
        // cargo test needs no configuration
        let has_config = kind == ManifestKind::Cargo || Self::has_test_config(project);
        let metadata = json!({ "has_tests": has_tests, "has_config": has_config });

        let result = match (has_tests, has_config) {
            (false, false) => CheckResult::new(
                self.name(),
                CheckStatus::Error,
                "No tests or test configuration found",
                "No test directory (tests/, test/) or test runner configuration was found.",
            )
            .with_suggestions([
                "Add tests in a 'tests' directory",
                "Configure a test runner (pytest, jest, cargo test)",
            ]),
            (false, true) => CheckResult::new(
                self.name(),
                CheckStatus::Warning,
                "Test configuration found but no tests",
                "A test runner is configured but no tests were located.",
            )
            .with_suggestions(["Add tests covering the main code paths"]),
            (true, false) => CheckResult::new(
                self.name(),
                CheckStatus::Warning,
                "Tests found but no test configuration",
                "Test files exist but no explicit test runner configuration was detected.",
            )
            .with_suggestions(["Add a pytest.ini or [tool.pytest] section", "Report test coverage in CI"]),
            (true, true) => CheckResult::new(
                self.name(),
                CheckStatus::Success,
                "Tests are set up",
                "A test suite and test runner configuration were found.",
            ),
        };
        Ok(Some(result.with_metadata("testing", metadata)))
    }
}
