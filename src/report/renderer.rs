//! Tera-backed report rendering
//!
//! Templates are compiled into the binary. Names ending in `.html` are
//! autoescaped; Markdown templates are not.

use super::error::ReportError;
use super::view::{RepoReportView, SummaryView};
use std::sync::Arc;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("_style.html", include_str!("../../templates/_style.html.tera")),
    ("repo_report.html", include_str!("../../templates/repo_report.html.tera")),
    ("repo_report.md", include_str!("../../templates/repo_report.md.tera")),
    ("repo_report.llm.md", include_str!("../../templates/repo_report.llm.md.tera")),
    ("summary.html", include_str!("../../templates/summary.html.tera")),
    ("summary.md", include_str!("../../templates/summary.md.tera")),
];

/// Per-repository artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoArtifact {
    Html,
    Markdown,
    LlmMarkdown,
    Json,
}

impl RepoArtifact {
    pub fn extension(self) -> &'static str {
        match self {
            RepoArtifact::Html => "html",
            RepoArtifact::Markdown => "md",
            RepoArtifact::LlmMarkdown => "llm.md",
            RepoArtifact::Json => "json",
        }
    }

    fn template(self) -> Option<&'static str> {
        match self {
            RepoArtifact::Html => Some("repo_report.html"),
            RepoArtifact::Markdown => Some("repo_report.md"),
            RepoArtifact::LlmMarkdown => Some("repo_report.llm.md"),
            RepoArtifact::Json => None,
        }
    }
}

/// Summary artifact kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryArtifact {
    Html,
    Markdown,
    Json,
}

impl SummaryArtifact {
    pub fn file_name(self) -> &'static str {
        match self {
            SummaryArtifact::Html => "summary.html",
            SummaryArtifact::Markdown => "summary.md",
            SummaryArtifact::Json => "summary.json",
        }
    }
}

#[derive(Clone)]
pub struct Renderer {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new() -> Result<Self, ReportError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        tera.autoescape_on(vec![".html"]);
        Ok(Self { tera: Arc::new(tera) })
    }

    fn render(&self, name: &str, context: &Context) -> Result<String, ReportError> {
        self.tera.render(name, context).map_err(|e| match ReportError::from(e) {
            ReportError::Template { message, .. } => ReportError::Template {
                name: name.to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn render_repo(&self, view: &RepoReportView, artifact: RepoArtifact) -> Result<String, ReportError> {
        match artifact.template() {
            Some(name) => self.render(name, &Context::from_serialize(view)?),
            None => Ok(serde_json::to_string_pretty(view)?),
        }
    }

    pub fn render_summary(&self, view: &SummaryView<'_>, artifact: SummaryArtifact) -> Result<String, ReportError> {
        match artifact {
            SummaryArtifact::Html => self.render("summary.html", &Context::from_serialize(view)?),
            SummaryArtifact::Markdown => self.render("summary.md", &Context::from_serialize(view)?),
            SummaryArtifact::Json => Ok(serde_json::to_string_pretty(view)?),
        }
    }
}
