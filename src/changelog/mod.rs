//! Commit-history analysis and changelog rendering

pub mod analyzer;
pub mod render;
pub mod types;

pub use analyzer::{classify_commit, ChangeAnalyzer, ChangelogError, GitChangeAnalyzer};
pub use render::render_changelog_markdown;
pub use types::{ChangeSummary, CommitInfo, CommitType, FileChurn};
