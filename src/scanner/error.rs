//! Scanner Error Types

use std::fmt;
use std::path::PathBuf;

/// Setup failures that abort a scan before any repository is processed
#[derive(Debug, Clone)]
pub enum ScanError {
    /// Scan root missing or not a directory
    RootNotFound { path: PathBuf, message: String },
    /// Output directory cannot be created or written
    OutputDir { path: PathBuf, message: String },
    /// Invalid scan configuration
    Configuration { message: String },
    /// Runtime failure outside any single repository
    Internal { message: String },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::RootNotFound { message, .. } => write!(f, "Root directory error: {}", message),
            ScanError::OutputDir { message, .. } => write!(f, "Output directory error: {}", message),
            ScanError::Configuration { message } => write!(f, "Configuration error: {}", message),
            ScanError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for ScanError {}

impl crate::core::error_handling::ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ScanError::RootNotFound { .. } => true,
            ScanError::OutputDir { .. } => true,
            ScanError::Configuration { .. } => true,
            ScanError::Internal { .. } => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::RootNotFound { message, .. }
            | ScanError::OutputDir { message, .. }
            | ScanError::Configuration { message } => Some(message),
            ScanError::Internal { .. } => None,
        }
    }
}

/// Failure constructing a repository descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    NotFound { path: PathBuf },
    NotARepository { path: PathBuf },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryError::NotFound { path } => {
                write!(f, "Path does not exist: {}", path.display())
            }
            DiscoveryError::NotARepository { path } => {
                write!(f, "Not a git repository (no .git): {}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Failure of a single git invocation
#[derive(Debug, Clone)]
pub enum GitError {
    /// The git binary could not be started
    Spawn { message: String },
    /// git exited non-zero
    Failed { args: String, status: Option<i32>, stderr: String },
    /// git did not finish within the configured timeout
    Timeout { args: String, seconds: u64 },
    /// Output could not be interpreted
    Parse { args: String, message: String },
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::Spawn { message } => write!(f, "Failed to run git: {}", message),
            GitError::Failed { args, status, stderr } => match status {
                Some(code) => write!(f, "git {} exited with {}: {}", args, code, stderr.trim()),
                None => write!(f, "git {} was terminated: {}", args, stderr.trim()),
            },
            GitError::Timeout { args, seconds } => {
                write!(f, "git {} timed out after {}s", args, seconds)
            }
            GitError::Parse { args, message } => {
                write!(f, "Unexpected output from git {}: {}", args, message)
            }
        }
    }
}

impl std::error::Error for GitError {}
