//! Checker contract and result types

use super::project::Project;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Outcome category of one check
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Warning,
    Suggestion,
    Error,
}

impl CheckStatus {
    pub fn is_success(self) -> bool {
        self == CheckStatus::Success
    }

    /// Fix priority label used by the LLM-oriented report (P0 is most urgent)
    pub fn priority(self) -> Option<&'static str> {
        match self {
            CheckStatus::Error => Some("P0"),
            CheckStatus::Warning => Some("P1"),
            CheckStatus::Suggestion => Some("P2"),
            CheckStatus::Success => None,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CheckStatus::Success => "✅",
            CheckStatus::Warning => "⚠️",
            CheckStatus::Suggestion => "💡",
            CheckStatus::Error => "❌",
        }
    }
}

/// Result produced by one checker for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub checker_name: String,
    pub title: String,
    pub status: CheckStatus,
    pub details: String,
    /// Remediation steps, most important first
    pub suggestions: Vec<String>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl CheckResult {
    pub fn new(
        checker_name: impl Into<String>,
        status: CheckStatus,
        title: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            checker_name: checker_name.into(),
            title: title.into(),
            status,
            details: details.into(),
            suggestions: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions.extend(suggestions.into_iter().map(Into::into));
        self
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }
}

/// Failure inside a checker. The scan unit records the checker's slot as absent.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("I/O error reading '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Checker '{checker}' failed: {message}")]
    Failed { checker: String, message: String },
}

/// A stateless inspection of a project.
///
/// `Ok(None)` means the checker does not apply to this project; it is not a failure.
pub trait Checker: Send + Sync {
    /// Stable identifier used as the result key
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(&self, project: &Project) -> Result<Option<CheckResult>, CheckError>;
}
