//! Scanner API
//!
//! Public surface of the scanner for the application layer and integration tests.

// Orchestration
pub use crate::scanner::manager::ScanManager;
pub use crate::scanner::task::{scan_one, ScanContext};

// Discovery
pub use crate::scanner::discovery::{derive_identity, discover, find_repository_dirs, passes_since};

// Configuration and progress
pub use crate::scanner::config::{ReportFormat, ScanConfig, DEFAULT_JOBS, DEFAULT_OUTPUT_DIR};
pub use crate::scanner::progress::{LogProgress, NoProgress, ProgressSink};

// Error handling
pub use crate::scanner::error::{DiscoveryError, GitError, ScanError};

// Data types
pub use crate::scanner::types::{
    sort_summary_entries, RepositoryDescriptor, RepositoryMetadata, ScanResult, ScanSummaryEntry,
    UNKNOWN_BRANCH,
};
