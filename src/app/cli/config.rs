//! TOML configuration file parsing and loading
//!
//! This module handles loading the optional configuration file and merging it
//! with command-line flags. A flag given on the command line always wins over
//! the file, and the file wins over the built-in default.

use super::args::{Cli, ScanArgs};
use super::date_parser::{parse_since, DEFAULT_SINCE};
use crate::core::error_handling::ContextualError;
use crate::scanner::{ReportFormat, ScanConfig};
use crate::scanner::api::{DEFAULT_JOBS, DEFAULT_OUTPUT_DIR};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR_NAME: &str = "Weekly";
const CONFIG_FILE_NAME: &str = "weekly.toml";

/// Errors raised while reading the configuration or resolving options
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFound { path: PathBuf, message: String },
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Invalid { message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound { message, .. } => write!(f, "{}", message),
            ConfigError::Read { path, message } => {
                write!(f, "Error reading configuration file {}: {}", path.display(), message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Error parsing configuration file {}: {}", path.display(), message)
            }
            ConfigError::Invalid { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { message, .. } | ConfigError::Invalid { message } => {
                Some(message)
            }
            // Display carries the file path for these
            ConfigError::Read { .. } | ConfigError::Parse { .. } => None,
        }
    }
}

/// Values read from the configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    pub output: Option<PathBuf>,
    pub since: Option<String>,
    pub recursive: Option<bool>,
    pub jobs: Option<usize>,
    pub format: Option<ReportFormat>,
    pub summary_only: Option<bool>,
    pub git_timeout: Option<u64>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
    pub color: Option<bool>,
}

/// `<config dir>/Weekly/weekly.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the configuration file.
///
/// An explicitly named file must exist; the default location is optional.
pub async fn load_config(config_file: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                    message: format!(
                        "The specified configuration file does not exist: {}",
                        path.display()
                    ),
                });
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(FileConfig::default()),
        },
    };

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
    let config = parse_config(&path, &contents)?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

pub fn parse_config(path: &Path, contents: &str) -> Result<FileConfig, ConfigError> {
    let config: FileConfig = toml::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if config.jobs == Some(0) {
        return Err(ConfigError::Invalid {
            message: format!("'jobs' must be at least 1 in {}", path.display()),
        });
    }
    if config.git_timeout == Some(0) {
        return Err(ConfigError::Invalid {
            message: format!("'git-timeout' must be at least 1 in {}", path.display()),
        });
    }
    Ok(config)
}

/// Logging options after merging flags and file
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingOptions {
    pub level: String,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
    pub color: bool,
}

/// Merge global options with the file.
///
/// `--verbose` raises the level to debug unless a level was given explicitly.
/// Color defaults to whether stderr is a terminal.
pub fn resolve_logging(cli: &Cli, file: &FileConfig, is_terminal: bool) -> LoggingOptions {
    let level = cli
        .log_level
        .clone()
        .or_else(|| file.log_level.clone())
        .unwrap_or_else(|| {
            if cli.verbose() {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    let log_file = match &cli.log_file {
        Some(path) => Some(path.clone()),
        None => file.log_file.as_ref().map(PathBuf::from),
    }
    .filter(|path| {
        let text = path.to_string_lossy();
        !(text.eq_ignore_ascii_case("none") || text == "-")
    });

    LoggingOptions {
        level,
        format: cli.log_format.clone().or_else(|| file.log_format.clone()),
        file: log_file,
        color: cli.color_flag().or(file.color).unwrap_or(is_terminal),
    }
}

/// Build the scan context from `scan` flags and the file
pub fn resolve_scan_config(args: &ScanArgs, file: &FileConfig) -> Result<ScanConfig, ConfigError> {
    let output = args
        .output
        .clone()
        .or_else(|| file.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let since_text = args
        .since
        .clone()
        .or_else(|| file.since.clone())
        .unwrap_or_else(|| DEFAULT_SINCE.to_string());
    let since = parse_since(&since_text).map_err(|message| ConfigError::Invalid { message })?;

    let mut config = ScanConfig::new(&args.root, output)
        .with_since(Some(since))
        .with_recursive(args.recursive_flag().or(file.recursive).unwrap_or(true))
        .with_jobs(args.jobs.or(file.jobs).unwrap_or(DEFAULT_JOBS))
        .with_format(args.format.or(file.format).unwrap_or_default())
        .with_summary_only(args.summary_only || file.summary_only.unwrap_or(false));
    if let Some(secs) = args.git_timeout.or(file.git_timeout) {
        config = config.with_git_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}
