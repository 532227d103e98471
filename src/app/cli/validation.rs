//! CLI argument validation utilities
//!
//! Value parsers used by clap plus the checks that need the filesystem.

use super::config::ConfigError;
use std::path::{Path, PathBuf};

/// Validate positive integer value
pub fn positive_usize(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate a timeout given in whole seconds
pub fn positive_secs(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("Timeout must be at least 1 second".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid number of seconds", value)),
    }
}

/// The `analyze` target must be an existing directory
pub fn validate_project_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Invalid {
            message: format!("Project directory does not exist: {}", path.display()),
        });
    }
    if !path.is_dir() {
        return Err(ConfigError::Invalid {
            message: format!("Not a directory: {}", path.display()),
        });
    }
    path.canonicalize().map_err(|e| ConfigError::Invalid {
        message: format!("Cannot resolve {}: {}", path.display(), e),
    })
}
