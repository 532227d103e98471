//! Logging backend setup
//!
//! The crate logs through the `log` facade; this module installs `flexi_logger`
//! as the backend with one of three line formats (`text`, `ext`, `json`).

use std::sync::{Mutex, OnceLock};
use thiserror::Error;

// Global logger handle so the level can be changed after startup
static LOGGER_HANDLE: OnceLock<Mutex<flexi_logger::LoggerHandle>> = OnceLock::new();

/// Errors raised while configuring the logger
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log specification '{spec}': {message}")]
    InvalidSpec { spec: String, message: String },

    #[error("Failed to start logger: {message}")]
    StartFailed { message: String },

    #[error("Logger handle not initialised")]
    NotInitialised,
}

/// Supported log line formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Ext,
    Json,
}

impl LogFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("json") => LogFormat::Json,
            Some("ext") => LogFormat::Ext,
            _ => LogFormat::Text,
        }
    }
}

/// Install flexi_logger as the `log` backend.
///
/// Calling this twice is harmless: the second call fails inside flexi_logger and
/// the level of the running logger is updated instead.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&std::path::Path>,
    color_enabled: bool,
) -> Result<(), LoggingError> {
    use flexi_logger::{FileSpec, Logger};

    let level_str = log_level.unwrap_or("info");
    if LOGGER_HANDLE.get().is_some() {
        return reconfigure_logging(Some(level_str));
    }

    let mut logger = Logger::try_with_str(level_str).map_err(|e| LoggingError::InvalidSpec {
        spec: level_str.to_string(),
        message: e.to_string(),
    })?;

    logger = match (LogFormat::parse(log_format), color_enabled) {
        (LogFormat::Json, _) => logger.format(json_format),
        (LogFormat::Ext, true) => logger.format(extended_color_format),
        (LogFormat::Ext, false) => logger.format(extended_format),
        (LogFormat::Text, true) => logger.format(simple_color_format),
        (LogFormat::Text, false) => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec =
            FileSpec::try_from(file_path).map_err(|e| LoggingError::StartFailed {
                message: format!("invalid log file '{}': {}", file_path.display(), e),
            })?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start().map_err(|e| LoggingError::StartFailed {
        message: e.to_string(),
    })?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

/// Change the active log level at runtime.
///
/// Only the level can change; format and file destination are fixed at startup.
pub fn reconfigure_logging(log_level: Option<&str>) -> Result<(), LoggingError> {
    let handle_mutex = LOGGER_HANDLE.get().ok_or(LoggingError::NotInitialised)?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| LoggingError::NotInitialised)?;
    if let Some(level) = log_level {
        handle
            .parse_and_push_temp_spec(level)
            .map_err(|e| LoggingError::InvalidSpec {
                spec: level.to_string(),
                message: e.to_string(),
            })?;
    }
    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    match level {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    }
}

// "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// "YYYY-MM-DD HH:mm:ss.fff INF message (scanner/manager.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use serde_json::{json, to_string};

    let json_obj = json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line())
    });

    match to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// weekly::scanner::manager -> scanner/manager.rs
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = if let Some(without_prefix) = target.strip_prefix("weekly::") {
        without_prefix.replace("::", "/") + ".rs"
    } else {
        target.replace("::", "/")
    };

    if let Some(line_num) = line {
        format!("{}:{}", path_like, line_num)
    } else {
        path_like
    }
}

/// Send panic reports through the logger instead of raw stderr.
///
/// Panics on worker threads are contained and reported by the scan layers,
/// so they are only logged at debug level here.
pub fn route_panics_to_log() {
    std::panic::set_hook(Box::new(|info| {
        let level = panic_level(std::thread::current().name());
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        log::log!(level, "panic at {}: {}", location, panic_payload(info.payload()));
    }));
}

fn panic_level(thread_name: Option<&str>) -> log::Level {
    if thread_name == Some("main") {
        log::Level::Error
    } else {
        log::Level::Debug
    }
}

pub(crate) fn panic_payload(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
