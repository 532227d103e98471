//! Application startup and command dispatch

use super::cli::args::{AnalyzeArgs, Cli, Command, ScanArgs};
use super::cli::config::{load_config, resolve_logging, resolve_scan_config, FileConfig};
use super::cli::display::{print_scan_table, render_analysis};
use super::cli::validation::validate_project_dir;
use super::spinner::{should_show_spinner, SpinnerProgress};
use crate::checkers::{CheckStatus, CheckerRegistry, Project};
use crate::core::error_handling::{describe_error, log_error_with_context};
use crate::core::logging::{init_logging, route_panics_to_log};
use crate::core::version::long_version;
use crate::scanner::{LogProgress, ProgressSink, ScanManager};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

/// Parse arguments, set up logging and run the selected command
pub async fn startup() -> ExitCode {
    let cli = Cli::parse();

    // Logging is not up yet, so configuration problems go straight to stderr
    let file_config = match load_config(cli.config_file.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", describe_error(&e, "Loading configuration"));
            return ExitCode::FAILURE;
        }
    };

    let logging = resolve_logging(&cli, &file_config, std::io::stderr().is_terminal());
    colored::control::set_override(logging.color);
    if let Err(e) = init_logging(
        Some(&logging.level),
        logging.format.as_deref(),
        logging.file.as_deref(),
        logging.color,
    ) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    route_panics_to_log();

    log::debug!("{}: weekly {} starting", cli.command_name(), long_version());

    match &cli.command {
        Command::Scan(args) => run_scan(args, &file_config, logging.color).await,
        Command::Analyze(args) => run_analyze(args, logging.color).await,
    }
}

async fn run_scan(args: &ScanArgs, file_config: &FileConfig, use_color: bool) -> ExitCode {
    let config = match resolve_scan_config(args, file_config) {
        Ok(config) => config,
        Err(e) => {
            log_error_with_context(&e, "Resolving scan options");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Scanning git repositories in {}", config.root.display());
    if let Some(since) = config.since {
        log::info!("Showing changes since: {}", since.format("%Y-%m-%d"));
    }
    log::debug!(
        "Output: {}, jobs: {}, recursive: {}, format: {}, summary only: {}",
        config.output_dir.display(),
        config.jobs,
        config.recursive,
        config.format,
        config.summary_only
    );

    let progress: Arc<dyn ProgressSink> = if should_show_spinner() {
        Arc::new(SpinnerProgress::new())
    } else {
        Arc::new(LogProgress)
    };
    let manager = ScanManager::new(config).with_progress(progress);

    match manager.scan_all().await {
        Ok(results) if results.is_empty() => {
            println!("No repositories found or no changes detected.");
            ExitCode::SUCCESS
        }
        Ok(results) => {
            print_scan_table(&results, use_color);
            let failed = results.iter().filter(|r| r.error.is_some()).count();
            println!();
            println!("✓ Scanned {} repositories", results.len());
            if failed > 0 {
                println!("{} repositories reported errors; see the summary", failed);
            }
            println!("📊 Summary report: {}", manager.summary_path().display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error_with_context(&e, "Scanning repositories");
            ExitCode::FAILURE
        }
    }
}

async fn run_analyze(args: &AnalyzeArgs, use_color: bool) -> ExitCode {
    let path = match validate_project_dir(&args.path) {
        Ok(path) => path,
        Err(e) => {
            log_error_with_context(&e, "Analyzing project");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Analyzing project at {}", path.display());

    let project_path = path.clone();
    let results = match tokio::task::spawn_blocking(move || {
        CheckerRegistry::builtin().run_all(&Project::new(project_path))
    })
    .await
    {
        Ok(results) => results,
        Err(e) => {
            log::error!("FATAL: Analyzing project: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let to_stdout = args.output == "-";
    let rendered = match render_analysis(
        &path,
        &results,
        args.format,
        !args.no_suggestions,
        use_color && to_stdout,
    ) {
        Ok(rendered) => rendered,
        Err(e) => {
            log::error!("FATAL: Rendering analysis: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if to_stdout {
        println!("{}", rendered);
    } else if let Err(e) = write_output(Path::new(&args.output), &rendered).await {
        log::error!("FATAL: Cannot write {}: {}", args.output, e);
        return ExitCode::FAILURE;
    } else {
        log::info!("Report saved to {}", args.output);
    }

    let has_errors = results
        .values()
        .flatten()
        .any(|result| result.status == CheckStatus::Error);
    if has_errors {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await
}
