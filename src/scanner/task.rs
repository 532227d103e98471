//! Per-Repository Scan Unit
//!
//! Runs the changelog analysis, the checker battery and per-repository report
//! generation for one repository. Every step is fault-isolated: failures are
//! recorded on the returned [`ScanResult`] rather than propagated.

use super::config::ScanConfig;
use super::types::{RepositoryDescriptor, ScanResult};
use crate::changelog::ChangeAnalyzer;
use crate::checkers::{CheckerRegistry, Project};
use crate::report::ArtifactWriter;
use std::sync::Arc;

/// Shared, read-only collaborators for scan units
#[derive(Clone)]
pub struct ScanContext {
    pub config: Arc<ScanConfig>,
    pub registry: CheckerRegistry,
    pub analyzer: Arc<dyn ChangeAnalyzer>,
    pub writer: ArtifactWriter,
}

impl ScanContext {
    pub fn new(
        config: Arc<ScanConfig>,
        registry: CheckerRegistry,
        analyzer: Arc<dyn ChangeAnalyzer>,
        writer: ArtifactWriter,
    ) -> Self {
        Self {
            config,
            registry,
            analyzer,
            writer,
        }
    }
}

/// Scan one repository. Never fails; problems are recorded on the result.
pub async fn scan_one(descriptor: RepositoryDescriptor, ctx: ScanContext) -> ScanResult {
    let label = descriptor.label();
    let mut result = ScanResult::new(descriptor);
    log::debug!("Scanning {}", label);

    if let Some(since) = ctx.config.since {
        run_changelog(&mut result, &ctx, since).await;
    }

    run_checkers(&mut result, &ctx).await;

    if !ctx.config.summary_only {
        write_report(&mut result, &ctx).await;
    }

    if let Some(error) = &result.error {
        log::warn!("{}: {}", label, error);
    }
    result
}

async fn run_changelog(result: &mut ScanResult, ctx: &ScanContext, since: chrono::DateTime<chrono::Local>) {
    let path = result.repository.path().to_path_buf();
    let summary = match ctx.analyzer.summarize(&path, since).await {
        Ok(summary) => summary,
        Err(e) => {
            result.record_error(format!("Changelog analysis failed: {}", e));
            return;
        }
    };

    if !ctx.config.summary_only {
        let text = ctx.analyzer.render_changelog(&summary);
        let writer = ctx.writer.clone();
        let repository = result.repository.clone();
        let written =
            tokio::task::spawn_blocking(move || writer.write_changelog(&repository, &text)).await;
        match written {
            Ok(Ok(path)) => log::debug!("Wrote {}", path.display()),
            Ok(Err(e)) => result.record_error(format!("Changelog write failed: {}", e)),
            Err(e) => result.record_error(format!("Changelog write aborted: {}", e)),
        }
    }
    result.changes = Some(summary);
}

async fn run_checkers(result: &mut ScanResult, ctx: &ScanContext) {
    let registry = ctx.registry.clone();
    let path = result.repository.path().to_path_buf();
    match tokio::task::spawn_blocking(move || registry.run_all(&Project::new(path))).await {
        Ok(results) => result.results = results,
        Err(e) => result.record_error(format!("Checker run aborted: {}", e)),
    }
}

async fn write_report(result: &mut ScanResult, ctx: &ScanContext) {
    let writer = ctx.writer.clone();
    let snapshot = result.clone();
    match tokio::task::spawn_blocking(move || writer.write_repo_report(&snapshot)).await {
        Ok(Ok(path)) => result.report_path = Some(path),
        Ok(Err(e)) => result.record_error(format!("Report generation failed: {}", e)),
        Err(e) => result.record_error(format!("Report generation aborted: {}", e)),
    }
}
