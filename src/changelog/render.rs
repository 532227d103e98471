//! Markdown changelog rendering

use super::types::ChangeSummary;
use crate::core::strings::title_case;
use std::fmt::Write;

const FILES_SHOWN: usize = 5;
const COMMITS_SHOWN: usize = 10;

/// Render a change summary as the `changelog.md` body
pub fn render_changelog_markdown(summary: &ChangeSummary) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_changelog(&mut out, summary);
    out
}

fn write_changelog(out: &mut String, summary: &ChangeSummary) -> std::fmt::Result {
    writeln!(out, "## 📊 Change Summary")?;
    writeln!(out)?;
    writeln!(out, "_Since {}_", summary.since.format("%Y-%m-%d %H:%M"))?;
    writeln!(out)?;
    writeln!(out, "- **Total Commits:** {}", summary.commits.len())?;
    writeln!(out, "- **Files Changed:** {}", summary.total_files)?;
    writeln!(out, "- **Lines Added:** {}", summary.total_additions)?;
    writeln!(out, "- **Lines Removed:** {}", summary.total_deletions)?;
    writeln!(out)?;

    if !summary.commit_types.is_empty() {
        writeln!(out, "### Commit Types")?;
        writeln!(out)?;
        for (commit_type, count) in summary.commit_types_by_count() {
            writeln!(
                out,
                "- {} **{}:** {}",
                commit_type.emoji(),
                title_case(&commit_type.to_string()),
                count
            )?;
        }
        writeln!(out)?;
    }

    if !summary.most_changed_files.is_empty() {
        writeln!(out, "### Most Changed Files")?;
        writeln!(out)?;
        for file in summary.most_changed_files.iter().take(FILES_SHOWN) {
            writeln!(out, "- `{}` ({} commits)", file.path, file.commits)?;
        }
        writeln!(out)?;
    }

    if !summary.commits.is_empty() {
        writeln!(out, "### Recent Commits")?;
        writeln!(out)?;
        for commit in summary.commits.iter().take(COMMITS_SHOWN) {
            writeln!(
                out,
                "- `{}` {} ({}, {})",
                commit.short_hash(),
                commit.subject,
                commit.author,
                commit.date.format("%Y-%m-%d")
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
