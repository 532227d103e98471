//! CLI display utilities for formatting output

use super::args::AnalyzeFormat;
use crate::checkers::{CheckResult, CheckResults, CheckStatus};
use crate::core::styles::StyleRole;
use crate::scanner::api::sort_summary_entries;
use crate::scanner::{ScanResult, ScanSummaryEntry};
use chrono::Local;
use prettytable::{format, Cell, Row, Table};
use std::path::Path;

const RULE_WIDTH: usize = 80;

fn styled_cell(text: &str, role: StyleRole, use_color: bool) -> Cell {
    let cell = Cell::new(text);
    match role.to_prettytable_spec() {
        Some(spec) if use_color => cell.style_spec(&spec),
        _ => cell,
    }
}

fn count_cell(count: usize, status: CheckStatus, use_color: bool) -> Cell {
    if count == 0 {
        return styled_cell("0", StyleRole::Dim, use_color);
    }
    styled_cell(&count.to_string(), StyleRole::for_status(status), use_color)
}

/// Per-repository status table, in summary order
pub fn build_scan_table(results: &[ScanResult], use_color: bool) -> Table {
    let mut entries: Vec<ScanSummaryEntry> = results
        .iter()
        .map(|result| ScanSummaryEntry::from_result(result, false))
        .collect();
    sort_summary_entries(&mut entries);

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(
        [
            "Repository",
            "Branch",
            "Last commit",
            CheckStatus::Success.icon(),
            CheckStatus::Warning.icon(),
            CheckStatus::Suggestion.icon(),
            CheckStatus::Error.icon(),
            "Status",
        ]
        .iter()
        .map(|title| styled_cell(title, StyleRole::Header, use_color))
        .collect(),
    ));

    for entry in &entries {
        let (status, role) = if entry.failed {
            ("failed", StyleRole::Error)
        } else if entry.errors > 0 {
            ("errors", StyleRole::Error)
        } else if entry.has_issues {
            ("issues", StyleRole::Warning)
        } else {
            ("ok", StyleRole::Success)
        };
        table.add_row(Row::new(vec![
            styled_cell(&entry.label(), StyleRole::Key, use_color),
            Cell::new(&entry.branch),
            styled_cell(&entry.last_commit, StyleRole::Dim, use_color),
            count_cell(entry.successes, CheckStatus::Success, use_color),
            count_cell(entry.warnings, CheckStatus::Warning, use_color),
            count_cell(entry.suggestions, CheckStatus::Suggestion, use_color),
            count_cell(entry.errors, CheckStatus::Error, use_color),
            styled_cell(status, role, use_color),
        ]));
    }
    table
}

pub fn print_scan_table(results: &[ScanResult], use_color: bool) {
    if results.is_empty() {
        return;
    }
    build_scan_table(results, use_color).printstd();
}

/// Status totals over the results that applied
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AnalysisCounts {
    pub success: usize,
    pub warnings: usize,
    pub suggestions: usize,
    pub errors: usize,
    pub not_applicable: usize,
}

impl AnalysisCounts {
    pub fn from_results(results: &CheckResults) -> Self {
        let mut counts = Self::default();
        for result in results.values() {
            match result.as_ref().map(|r| r.status) {
                Some(CheckStatus::Success) => counts.success += 1,
                Some(CheckStatus::Warning) => counts.warnings += 1,
                Some(CheckStatus::Suggestion) => counts.suggestions += 1,
                Some(CheckStatus::Error) => counts.errors += 1,
                None => counts.not_applicable += 1,
            }
        }
        counts
    }
}

/// Render an `analyze` run in the requested format
pub fn render_analysis(
    project: &Path,
    results: &CheckResults,
    output_format: AnalyzeFormat,
    show_suggestions: bool,
    use_color: bool,
) -> Result<String, serde_json::Error> {
    match output_format {
        AnalyzeFormat::Json => render_json(project, results, show_suggestions),
        AnalyzeFormat::Markdown => Ok(render_markdown(project, results, show_suggestions)),
        AnalyzeFormat::Text => Ok(render_text(project, results, show_suggestions, use_color)),
    }
}

fn project_name(project: &Path) -> String {
    project
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| project.display().to_string())
}

fn applied(results: &CheckResults) -> impl Iterator<Item = &CheckResult> {
    results.values().flatten()
}

fn render_json(
    project: &Path,
    results: &CheckResults,
    show_suggestions: bool,
) -> Result<String, serde_json::Error> {
    let mut checks = results.clone();
    if !show_suggestions {
        for result in checks.values_mut().flatten() {
            result.suggestions.clear();
        }
    }
    serde_json::to_string_pretty(&serde_json::json!({
        "project": project.display().to_string(),
        "generated_at": Local::now().to_rfc3339(),
        "summary": AnalysisCounts::from_results(results),
        "results": checks,
    }))
}

fn render_markdown(project: &Path, results: &CheckResults, show_suggestions: bool) -> String {
    let counts = AnalysisCounts::from_results(results);
    let mut out = String::new();
    out.push_str(&format!("# Project Analysis: {}\n\n", project_name(project)));
    out.push_str(&format!(
        "Generated {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str("## Summary\n\n");
    out.push_str(&format!("- ✅ {} passed\n", counts.success));
    out.push_str(&format!("- ⚠️ {} warnings\n", counts.warnings));
    out.push_str(&format!("- 💡 {} suggestions\n", counts.suggestions));
    out.push_str(&format!("- ❌ {} errors\n\n", counts.errors));
    out.push_str("## Results\n");
    for result in applied(results) {
        out.push_str(&format!("\n### {} {}\n\n", result.status.icon(), result.title));
        if !result.details.is_empty() {
            out.push_str(&format!("{}\n", result.details));
        }
        if show_suggestions && !result.suggestions.is_empty() {
            out.push('\n');
            for suggestion in &result.suggestions {
                out.push_str(&format!("- {}\n", suggestion));
            }
        }
    }
    out
}

fn render_text(
    project: &Path,
    results: &CheckResults,
    show_suggestions: bool,
    use_color: bool,
) -> String {
    let counts = AnalysisCounts::from_results(results);
    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = vec![
        StyleRole::Header.paint("📊 Weekly Project Analysis Report", use_color),
        "=".repeat(RULE_WIDTH),
        format!("Project: {}", project_name(project)),
        format!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        "Summary:".to_string(),
        rule.clone(),
        format!("✅ {} passed", counts.success),
        format!("⚠️  {} warnings", counts.warnings),
        format!("💡 {} suggestions", counts.suggestions),
        format!("❌ {} errors", counts.errors),
        String::new(),
        "Detailed Results:".to_string(),
        rule.clone(),
    ];

    for result in applied(results) {
        let role = StyleRole::for_status(result.status);
        lines.push(format!(
            "{} {}",
            result.status.icon(),
            role.paint(&result.title, use_color)
        ));
        if !result.details.is_empty() {
            lines.push(format!("  {}", result.details));
        }
        if show_suggestions && !result.suggestions.is_empty() {
            lines.push(String::new());
            lines.push("  Suggestions:".to_string());
            for suggestion in &result.suggestions {
                lines.push(format!("    • {}", suggestion));
            }
        }
        lines.push(String::new());
    }

    if show_suggestions {
        let mut actionable: Vec<&CheckResult> = applied(results)
            .filter(|r| !r.status.is_success() && !r.suggestions.is_empty())
            .collect();
        // Most urgent first; ties keep registry order
        actionable.sort_by_key(|r| r.status.priority());
        if !actionable.is_empty() {
            lines.push("Recommended Actions:".to_string());
            lines.push(rule);
            for (i, result) in actionable.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, result.title));
                for suggestion in &result.suggestions {
                    lines.push(format!("   • {}", suggestion));
                }
                lines.push(String::new());
            }
        }
    }

    lines.join("\n")
}
