//! Scan Orchestrator
//!
//! Fans discovered repositories out to a fixed pool of worker tasks fed from a
//! shared work queue. Completed results flow over a channel to a single
//! collector, which drives progress. The summary is written once, after every
//! worker has finished.

use super::config::ScanConfig;
use super::discovery::discover;
use super::error::ScanError;
use super::progress::{NoProgress, ProgressSink};
use super::task::{scan_one, ScanContext};
use super::types::{sort_summary_entries, RepositoryDescriptor, ScanResult, ScanSummaryEntry};
use crate::changelog::{ChangeAnalyzer, GitChangeAnalyzer};
use crate::checkers::CheckerRegistry;
use crate::report::ArtifactWriter;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Message from a worker to the collector
enum WorkerEvent {
    Completed(ScanResult),
    /// The unit escaped its own fault isolation; the repository is dropped
    Dropped { label: String },
}

/// Coordinates one batch scan
pub struct ScanManager {
    config: Arc<ScanConfig>,
    registry: CheckerRegistry,
    analyzer: Arc<dyn ChangeAnalyzer>,
    progress: Arc<dyn ProgressSink>,
}

impl ScanManager {
    pub fn new(config: ScanConfig) -> Self {
        let analyzer = GitChangeAnalyzer::new(config.git_timeout);
        Self {
            config: Arc::new(config),
            registry: CheckerRegistry::builtin(),
            analyzer: Arc::new(analyzer),
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_registry(mut self, registry: CheckerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn ChangeAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Location of the summary page for this configuration
    pub fn summary_path(&self) -> PathBuf {
        self.config.output_dir.join("summary.html")
    }

    /// Discover and scan every repository under the configured root.
    ///
    /// Returns an empty list, without touching the output directory, when no
    /// repository is found. Results are in completion order.
    pub async fn scan_all(&self) -> Result<Vec<ScanResult>, ScanError> {
        let config = Arc::new(self.config.as_ref().clone().validate()?);
        let descriptors = discover(&config).await?;
        if descriptors.is_empty() {
            log::info!("No repositories found under {}", config.root.display());
            return Ok(Vec::new());
        }
        log::info!("Found {} repositories under {}", descriptors.len(), config.root.display());
        for (label, paths) in shared_identities(&descriptors) {
            log::warn!(
                "{} repositories map to '{}' and will overwrite each other's reports: {}",
                paths.len(),
                label,
                paths.join(", ")
            );
        }

        tokio::fs::create_dir_all(&config.output_dir)
            .await
            .map_err(|e| ScanError::OutputDir {
                path: config.output_dir.clone(),
                message: format!("Cannot create output directory {}: {}", config.output_dir.display(), e),
            })?;
        let writer = ArtifactWriter::new(&config.output_dir, config.format).map_err(|e| ScanError::OutputDir {
            path: config.output_dir.clone(),
            message: e.to_string(),
        })?;

        let ctx = ScanContext::new(
            config.clone(),
            self.registry.clone(),
            self.analyzer.clone(),
            writer.clone(),
        );
        let results = self.run_pool(descriptors, ctx).await;

        let mut entries: Vec<ScanSummaryEntry> = results
            .iter()
            .map(|result| ScanSummaryEntry::from_result(result, !config.summary_only))
            .collect();
        sort_summary_entries(&mut entries);

        let since = config.since;
        let summary = tokio::task::spawn_blocking(move || writer.write_summary(&entries, since))
            .await
            .map_err(|e| ScanError::Internal {
                message: format!("summary rendering aborted: {}", e),
            })?;
        match summary {
            Ok(path) => log::info!("Summary written to {}", path.display()),
            Err(e) => {
                return Err(ScanError::OutputDir {
                    path: config.output_dir.clone(),
                    message: format!("Failed to write summary: {}", e),
                })
            }
        }

        Ok(results)
    }

    async fn run_pool(&self, descriptors: Vec<RepositoryDescriptor>, ctx: ScanContext) -> Vec<ScanResult> {
        let total = descriptors.len();
        let workers = self.config.jobs.clamp(1, total);

        let (work_tx, work_rx) = mpsc::channel::<RepositoryDescriptor>(total);
        for descriptor in descriptors {
            // Capacity equals the number of items, so this never waits
            if work_tx.send(descriptor).await.is_err() {
                break;
            }
        }
        drop(work_tx);
        let work_rx = Arc::new(Mutex::new(work_rx));

        let (event_tx, mut event_rx) = mpsc::channel::<WorkerEvent>(workers * 2);
        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let work_rx = Arc::clone(&work_rx);
            let event_tx = event_tx.clone();
            let ctx = ctx.clone();
            handles.push(tokio::spawn(async move {
                loop {
                    // Lock only long enough to take the next item
                    let next = work_rx.lock().await.recv().await;
                    let Some(descriptor) = next else {
                        break;
                    };
                    let label = descriptor.label();
                    let event = match tokio::spawn(scan_one(descriptor, ctx.clone())).await {
                        Ok(result) => WorkerEvent::Completed(result),
                        Err(e) => {
                            log::error!("Scan of {} failed on worker {}: {}", label, worker_id, e);
                            WorkerEvent::Dropped { label }
                        }
                    };
                    if event_tx.send(event).await.is_err() {
                        break;
                    }
                }
            }));
        }
        drop(event_tx);

        self.progress.started(total);
        let mut results = Vec::with_capacity(total);
        let mut done = 0;
        while let Some(event) = event_rx.recv().await {
            done += 1;
            match event {
                WorkerEvent::Completed(result) => {
                    self.progress.advanced(done, total, &result.repository.label());
                    results.push(result);
                }
                WorkerEvent::Dropped { label } => self.progress.advanced(done, total, &label),
            }
        }

        for handle in futures::future::join_all(handles).await {
            if let Err(e) = handle {
                log::error!("Scan worker terminated abnormally: {}", e);
            }
        }
        self.progress.finished(results.len(), total);
        results
    }
}

/// Identities claimed by more than one repository, with their paths
pub fn shared_identities(descriptors: &[RepositoryDescriptor]) -> Vec<(String, Vec<String>)> {
    let mut by_identity: BTreeMap<(&str, &str), Vec<String>> = BTreeMap::new();
    for descriptor in descriptors {
        by_identity
            .entry((descriptor.organization(), descriptor.name()))
            .or_default()
            .push(descriptor.path().display().to_string());
    }
    by_identity
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|((organization, name), paths)| {
            let label = if organization.is_empty() {
                name.to_string()
            } else {
                format!("{}/{}", organization, name)
            };
            (label, paths)
        })
        .collect()
}
