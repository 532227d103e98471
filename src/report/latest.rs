//! Stable `latest.*` pointers
//!
//! The pointer is first created under a temporary name and then renamed over
//! the old one, so at every moment `latest.<ext>` is either the previous or
//! the new artifact. A relative symlink is preferred; where symlinks are not
//! available the target is copied instead.

use super::error::ReportError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Point `dir/latest.<ext>` at `dir/<target_name>`
pub fn replace_latest(dir: &Path, target_name: &str, ext: &str) -> Result<PathBuf, ReportError> {
    let latest = dir.join(format!("latest.{}", ext));
    // Unique per call; concurrent writers may share a directory
    let staging = dir.join(format!(
        ".latest.{}.{}.{}.tmp",
        ext,
        std::process::id(),
        STAGING_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    remove_if_present(&staging)?;

    if let Err(e) = link(target_name, &staging) {
        log::debug!(
            "Symlink unavailable for {} ({}); copying instead",
            latest.display(),
            e
        );
        remove_if_present(&staging)?;
        fs::copy(dir.join(target_name), &staging).map_err(|e| ReportError::io(&staging, e))?;
    }

    if let Err(e) = fs::rename(&staging, &latest) {
        let _ = fs::remove_file(&staging);
        return Err(ReportError::io(&latest, e));
    }
    Ok(latest)
}

#[cfg(unix)]
fn link(target_name: &str, at: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target_name, at)
}

#[cfg(not(unix))]
fn link(_target_name: &str, _at: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks not used on this platform",
    ))
}

fn remove_if_present(path: &Path) -> Result<(), ReportError> {
    // symlink_metadata so a dangling link still counts as present
    match fs::symlink_metadata(path) {
        Ok(_) => fs::remove_file(path).map_err(|e| ReportError::io(path, e)),
        Err(_) => Ok(()),
    }
}
