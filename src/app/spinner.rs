//! Simple progress spinner for terminal feedback

use crate::scanner::ProgressSink;
use std::io::Write;
use std::sync::Mutex;

const BRAILLE_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Check if spinner should be displayed
pub fn should_show_spinner() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr()) && !log::log_enabled!(log::Level::Debug)
}

/// Simple spinner struct
pub struct ProgressSpinner {
    frame_index: usize,
}

impl ProgressSpinner {
    pub fn new() -> Self {
        Self { frame_index: 0 }
    }

    /// Advance one frame and return the line to draw
    pub fn tick(&mut self, message: &str) -> String {
        let frame = BRAILLE_FRAMES[self.frame_index];
        self.frame_index = (self.frame_index + 1) % BRAILLE_FRAMES.len();
        format!("{frame} {message}")
    }
}

impl Default for ProgressSpinner {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress sink that redraws a single spinner line on stderr
pub struct SpinnerProgress {
    spinner: Mutex<ProgressSpinner>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(ProgressSpinner::new()),
        }
    }

    fn draw(&self, message: &str) {
        if let Ok(mut spinner) = self.spinner.lock() {
            let line = spinner.tick(message);
            // Clear line and show spinner with message
            eprint!("\r\x1b[2K{line}");
            let _ = std::io::stderr().flush();
        }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for SpinnerProgress {
    fn started(&self, total: usize) {
        self.draw(&format!("[0/{total}] scanning"));
    }

    fn advanced(&self, done: usize, total: usize, label: &str) {
        self.draw(&format!("[{done}/{total}] {label}"));
    }

    fn finished(&self, _scanned: usize, _total: usize) {
        eprint!("\r\x1b[2K");
        let _ = std::io::stderr().flush();
    }
}
