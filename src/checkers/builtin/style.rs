//! Formatter and linter configuration presence

use crate::checkers::{CheckError, CheckResult, CheckStatus, Checker, ManifestKind, Project};
use serde_json::json;

pub struct StyleChecker;

struct ToolConfig {
    tool: &'static str,
    files: &'static [&'static str],
    pyproject_section: Option<&'static str>,
}

const RUST_TOOLS: &[ToolConfig] = &[
    ToolConfig { tool: "rustfmt", files: &["rustfmt.toml", ".rustfmt.toml"], pyproject_section: None },
    ToolConfig { tool: "clippy", files: &["clippy.toml", ".clippy.toml"], pyproject_section: None },
];

const PYTHON_TOOLS: &[ToolConfig] = &[
    ToolConfig { tool: "black", files: &[], pyproject_section: Some("black") },
    ToolConfig { tool: "ruff", files: &["ruff.toml", ".ruff.toml"], pyproject_section: Some("ruff") },
    ToolConfig { tool: "isort", files: &[".isort.cfg"], pyproject_section: Some("isort") },
    ToolConfig { tool: "flake8", files: &[".flake8"], pyproject_section: None },
];

const JS_TOOLS: &[ToolConfig] = &[
    ToolConfig {
        tool: "prettier",
        files: &[".prettierrc", ".prettierrc.json", ".prettierrc.js", "prettier.config.js"],
        pyproject_section: None,
    },
    ToolConfig {
        tool: "eslint",
        files: &[".eslintrc", ".eslintrc.json", ".eslintrc.js", "eslint.config.js"],
        pyproject_section: None,
    },
];

impl StyleChecker {
    fn configured(project: &Project, tools: &[ToolConfig]) -> Vec<&'static str> {
        tools
            .iter()
            .filter(|cfg| {
                cfg.files.iter().any(|f| project.exists(f))
                    || cfg.pyproject_section.is_some_and(|section| {
                        project
                            .pyproject()
                            .and_then(|p| p.get("tool"))
                            .and_then(|tool| tool.get(section))
                            .is_some()
                    })
            })
            .map(|cfg| cfg.tool)
            .collect()
    }
}

impl Checker for StyleChecker {
    fn name(&self) -> &'static str {
        "style"
    }

    fn description(&self) -> &'static str {
        "Checks for code formatter and linter configuration"
    }

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError> {
        let manifest = project.build_manifest();
        let tools = match manifest {
            Some(ManifestKind::Cargo) => RUST_TOOLS,
            Some(ManifestKind::Npm) => JS_TOOLS,
            Some(_) => PYTHON_TOOLS,
            None => return Ok(None),
        };

        let found = Self::configured(project, tools);
        let editorconfig = project.exists(".editorconfig");
        let metadata = json!(found);

        // rustfmt and clippy work with defaults; an explicit config is only a nicety
        if found.is_empty() && manifest != Some(ManifestKind::Cargo) {
            let names: Vec<&str> = tools.iter().map(|t| t.tool).collect();
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Warning,
                    "No formatter or linter configuration found",
                    format!("None of the usual style tools ({}) are configured.", names.join(", ")),
                )
                .with_suggestions([
                    format!("Configure {} to keep formatting consistent", names[0]),
                    "Run the formatter in CI to catch drift early".to_string(),
                ])
                .with_metadata("tools", metadata),
            ));
        }

        if !editorconfig {
            return Ok(Some(
                CheckResult::new(
                    self.name(),
                    CheckStatus::Suggestion,
                    "No .editorconfig found",
                    "An .editorconfig keeps indentation and line endings consistent across editors.",
                )
                .with_suggestions(["Add an .editorconfig file"])
                .with_metadata("tools", metadata),
            ));
        }

        let details = if found.is_empty() {
            "Default formatter settings with .editorconfig".to_string()
        } else {
            format!("Configured tools: {}", found.join(", "))
        };
        Ok(Some(
            CheckResult::new(self.name(), CheckStatus::Success, "Style tooling configured", details)
                .with_metadata("tools", metadata),
        ))
    }
}
