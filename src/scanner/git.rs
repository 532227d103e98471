//! Git subprocess helper
//!
//! Every git invocation goes through [`run_git`], which bounds the call with a
//! timeout so a hung subprocess cannot stall a worker.

use super::error::GitError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Run `git -C <repo> <args>` and return trimmed stdout
pub async fn run_git(repo: &Path, args: &[&str], timeout: Duration) -> Result<String, GitError> {
    let joined = args.join(" ");
    let mut command = Command::new("git");
    command
        .arg("-C")
        .arg(repo)
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(GitError::Spawn {
                message: e.to_string(),
            })
        }
        Err(_) => {
            return Err(GitError::Timeout {
                args: joined,
                seconds: timeout.as_secs(),
            })
        }
    };

    if !output.status.success() {
        return Err(GitError::Failed {
            args: joined,
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
