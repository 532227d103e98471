//! Scanner Component
//!
//! Concurrent multi-repository scanning:
//!
//! - **Discovery**: finds repositories under a root and reads their git metadata
//! - **Scan unit**: changelog analysis, checker battery and report for one repository
//! - **ScanManager**: bounded worker pool, result collection and the summary

pub mod api;
pub mod config;
pub mod discovery;
pub mod error;
pub mod git;
pub mod manager;
pub mod progress;
pub mod task;
pub mod types;

pub use config::{ReportFormat, ScanConfig};
pub use error::{DiscoveryError, GitError, ScanError};
pub use manager::ScanManager;
pub use progress::{LogProgress, NoProgress, ProgressSink};
pub use types::{RepositoryDescriptor, RepositoryMetadata, ScanResult, ScanSummaryEntry};
