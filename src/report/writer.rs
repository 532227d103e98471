//! Artifact Writer
//!
//! Layout under the output directory:
//!
//! ```text
//! summary.html                       (+ summary.md / summary.json)
//! <org>/<name>/<stamp>.html|.md|.llm.md   (+ .json)
//! <org>/<name>/latest.<ext>
//! <org>/<name>/changelog.md
//! ```
//!
//! Repositories without an organization live directly under the output
//! directory. Timestamped files are never overwritten.

use super::error::ReportError;
use super::latest::replace_latest;
use super::renderer::{Renderer, RepoArtifact, SummaryArtifact};
use super::view::{RepoReportView, SummaryView};
use crate::scanner::{ReportFormat, RepositoryDescriptor, ScanResult, ScanSummaryEntry};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";

#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    format: ReportFormat,
    renderer: Renderer,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>, format: ReportFormat) -> Result<Self, ReportError> {
        Ok(Self {
            output_dir: output_dir.into(),
            format,
            renderer: Renderer::new()?,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory holding one repository's artifacts
    pub fn repo_dir(&self, repository: &RepositoryDescriptor) -> PathBuf {
        let mut dir = self.output_dir.clone();
        if !repository.organization().is_empty() {
            dir.push(repository.organization());
        }
        dir.push(repository.name());
        dir
    }

    fn repo_artifacts(&self) -> Vec<RepoArtifact> {
        let mut artifacts = vec![RepoArtifact::Html, RepoArtifact::Markdown, RepoArtifact::LlmMarkdown];
        if self.format == ReportFormat::Json {
            artifacts.push(RepoArtifact::Json);
        }
        artifacts
    }

    /// Write timestamped reports and move every `latest.*` pointer to them.
    ///
    /// Returns the timestamped HTML report.
    pub fn write_repo_report(&self, result: &ScanResult) -> Result<PathBuf, ReportError> {
        let dir = self.repo_dir(&result.repository);
        fs::create_dir_all(&dir).map_err(|e| ReportError::io(&dir, e))?;

        let view = RepoReportView::from_result(result);
        let artifacts = self.repo_artifacts();
        let rendered = artifacts
            .iter()
            .map(|artifact| Ok((*artifact, self.renderer.render_repo(&view, *artifact)?)))
            .collect::<Result<Vec<_>, ReportError>>()?;

        let stamp = unique_stamp(&dir, Local::now(), &artifacts);
        let mut html_path = dir.join(format!("{}.html", stamp));
        for (artifact, content) in rendered {
            let file_name = format!("{}.{}", stamp, artifact.extension());
            let path = dir.join(&file_name);
            fs::write(&path, content).map_err(|e| ReportError::io(&path, e))?;
            replace_latest(&dir, &file_name, artifact.extension())?;
            if artifact == RepoArtifact::Html {
                html_path = path;
            }
        }
        log::debug!("Wrote {} reports to {}", result.repository.label(), dir.display());
        Ok(html_path)
    }

    /// Write `changelog.md` for one repository, replacing any previous one
    pub fn write_changelog(&self, repository: &RepositoryDescriptor, text: &str) -> Result<PathBuf, ReportError> {
        let dir = self.repo_dir(repository);
        fs::create_dir_all(&dir).map_err(|e| ReportError::io(&dir, e))?;
        let path = dir.join("changelog.md");
        fs::write(&path, text).map_err(|e| ReportError::io(&path, e))?;
        Ok(path)
    }

    /// Write the cross-repository summary. `entries` must already be sorted.
    ///
    /// Returns the path of `summary.html`.
    pub fn write_summary(
        &self,
        entries: &[ScanSummaryEntry],
        since: Option<DateTime<Local>>,
    ) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::io(&self.output_dir, e))?;
        let view = SummaryView::new(entries, since);

        let mut artifacts = vec![SummaryArtifact::Html];
        match self.format {
            ReportFormat::Html => {}
            ReportFormat::Markdown => artifacts.push(SummaryArtifact::Markdown),
            ReportFormat::Json => artifacts.push(SummaryArtifact::Json),
        }

        for artifact in artifacts {
            let content = self.renderer.render_summary(&view, artifact)?;
            let path = self.output_dir.join(artifact.file_name());
            fs::write(&path, content).map_err(|e| ReportError::io(&path, e))?;
        }
        Ok(self.output_dir.join(SummaryArtifact::Html.file_name()))
    }
}

/// Timestamp not yet used by any artifact in `dir`
fn unique_stamp(dir: &Path, now: DateTime<Local>, artifacts: &[RepoArtifact]) -> String {
    let base = now.format(STAMP_FORMAT).to_string();
    let taken = |stamp: &str| {
        artifacts
            .iter()
            .any(|a| dir.join(format!("{}.{}", stamp, a.extension())).exists())
    };
    if !taken(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
