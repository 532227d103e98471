//! Report rendering and artifact persistence

pub mod error;
pub mod latest;
pub mod renderer;
pub mod view;
pub mod writer;

pub use error::ReportError;
pub use renderer::{Renderer, RepoArtifact, SummaryArtifact};
pub use view::{RepoReportView, SummaryView};
pub use writer::ArtifactWriter;
