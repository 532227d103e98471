//! Report Error Types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Template '{name}' failed: {message}")]
    Template { name: String, message: String },

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Serialization failed: {message}")]
    Serialize { message: String },
}

impl ReportError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        ReportError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<tera::Error> for ReportError {
    fn from(err: tera::Error) -> Self {
        // tera nests the useful detail in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message = format!("{}: {}", message, inner);
            source = inner.source();
        }
        ReportError::Template {
            name: String::new(),
            message,
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialize {
            message: err.to_string(),
        }
    }
}
