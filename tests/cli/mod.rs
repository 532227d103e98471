//! CLI integration test modules

pub mod analyze_command;
pub mod global_options;
pub mod scan_command;

use std::path::Path;
use std::process::{Command, Output};

/// Run the binary with an isolated config directory so a user's
/// `weekly.toml` cannot leak into the test
pub fn weekly(args: &[&str], home: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weekly"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
