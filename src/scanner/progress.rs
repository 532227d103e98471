//! Progress reporting seam between the orchestrator and the UI

/// Receives orchestrator progress; called from the single collector task
pub trait ProgressSink: Send + Sync {
    fn started(&self, total: usize);

    /// One repository finished (or was dropped); `done` counts both
    fn advanced(&self, done: usize, total: usize, label: &str);

    fn finished(&self, scanned: usize, total: usize);
}

/// Sink that discards progress, for library use and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn started(&self, _total: usize) {}

    fn advanced(&self, _done: usize, _total: usize, _label: &str) {}

    fn finished(&self, _scanned: usize, _total: usize) {}
}

/// Sink that logs each step at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn started(&self, total: usize) {
        log::info!("Scanning {} repositories", total);
    }

    fn advanced(&self, done: usize, total: usize, label: &str) {
        log::info!("[{}/{}] {}", done, total, label);
    }

    fn finished(&self, scanned: usize, total: usize) {
        log::info!("Scanned {} of {} repositories", scanned, total);
    }
}
