//! Command-line arguments
//!
//! Global options come first and apply to every subcommand. Options that can
//! also be set in the configuration file are `Option`s here so that an absent
//! flag falls through to the file and then to the built-in default.

use super::validation::{positive_secs, positive_usize};
use crate::scanner::ReportFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "weekly")]
#[command(about = "Scan a tree of git repositories and report on project quality")]
#[command(version, long_version = crate::core::version::long_version())]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        global = true,
        value_parser = ["trace", "debug", "info", "warn", "error", "off"]
    )]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(
        long = "log-format",
        value_name = "FORMAT",
        global = true,
        value_parser = ["text", "ext", "json"]
    )]
    pub log_format: Option<String>,

    #[arg(
        long = "log-file",
        value_name = "FILE",
        global = true,
        help = "Log file path (use 'none' to disable file logging)"
    )]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", global = true, overrides_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true, overrides_with = "color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan every git repository under a directory and write reports
    Scan(ScanArgs),
    /// Run the project checks against a single directory
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Directory containing the repositories to scan
    #[arg(value_name = "ROOT_DIR", default_value = ".")]
    pub root: PathBuf,

    /// Output directory for reports [default: reports]
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "since",
        value_name = "DATE",
        help = "Only scan repositories with commits since this date (YYYY-MM-DD, 'yesterday', '7 days ago') [default: 7 days ago]"
    )]
    pub since: Option<String>,

    /// Descend into nested directories (default)
    #[arg(long = "recursive", overrides_with = "no_recursive")]
    pub recursive: bool,

    /// Only look at the root and its immediate children
    #[arg(long = "no-recursive", overrides_with = "recursive")]
    pub no_recursive: bool,

    /// Number of repositories scanned in parallel [default: 4]
    #[arg(short = 'j', long = "jobs", value_name = "N", value_parser = positive_usize)]
    pub jobs: Option<usize>,

    /// Additional report format [default: html]
    #[arg(short = 'f', long = "format", value_name = "FORMAT", value_enum)]
    pub format: Option<ReportFormat>,

    /// Only write the summary, not per-repository reports
    #[arg(long = "summary-only")]
    pub summary_only: bool,

    /// Show detailed output (debug logging unless --log-level is given)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Timeout for each git command, in seconds [default: 30]
    #[arg(long = "git-timeout", value_name = "SECS", value_parser = positive_secs)]
    pub git_timeout: Option<u64>,
}

impl ScanArgs {
    /// `Some` only when one of the recursion flags was given
    pub fn recursive_flag(&self) -> Option<bool> {
        match (self.recursive, self.no_recursive) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Output format of the `analyze` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AnalyzeFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Project directory to analyze
    #[arg(value_name = "PROJECT_DIR", default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = AnalyzeFormat::Text)]
    pub format: AnalyzeFormat,

    /// Output file ('-' for stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = "-")]
    pub output: String,

    /// Leave remediation suggestions out of the output
    #[arg(long = "no-suggestions")]
    pub no_suggestions: bool,

    /// Show detailed output (debug logging unless --log-level is given)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// `Some` only when --color or --no-color was given
    pub fn color_flag(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Scan(args) => args.verbose,
            Command::Analyze(args) => args.verbose,
        }
    }

    pub fn command_name(&self) -> &'static str {
        match self.command {
            Command::Scan(_) => "scan",
            Command::Analyze(_) => "analyze",
        }
    }
}
