//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_parity` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C wiring for cooperative cancellation
//! - Progress logging and user-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use std::process;
use std::sync::Arc;

use site_parity::initialization::{init_compare_client, init_logger_with, init_warmup_client};
use site_parity::report::{write_csv, write_jsonl};
use site_parity::{
    group_by_canonical, load_canonical_mapping, load_paths, print_group_summary,
    print_processing_statistics, run_comparison, warm_page, Config, PageStatus, ProcessingStats,
    ProgressEvent, RunHandle, RunOutcome,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let paths = load_paths(&config.paths_file)?;
    let mapping = match &config.sitemap {
        Some(sitemap) => Some(load_canonical_mapping(sitemap)?),
        None => None,
    };

    let stats = Arc::new(ProcessingStats::new());
    let client = init_compare_client(&config).context("Failed to initialize HTTP client")?;

    // Ctrl-C requests a stop; the run honors it at the next batch boundary
    let handle = RunHandle::new();
    let interrupt_handle = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after the current batch");
            interrupt_handle.cancel();
        }
    });

    if config.warm_cache {
        let warmup_client =
            init_warmup_client(&config).context("Failed to initialize warmup client")?;
        warm_sites(&warmup_client, &config, &paths).await;
    }

    let observer = |event: ProgressEvent| match event {
        ProgressEvent::Started { total } => {
            info!(
                "Comparing {} path{} on both hosts",
                total,
                if total == 1 { "" } else { "s" }
            );
        }
        ProgressEvent::PageCompared {
            index,
            total,
            path,
            status,
        } => match status {
            PageStatus::Ok => info!("[{}/{}] {} OK", index, total, path),
            PageStatus::Diff => warn!("[{}/{}] {} DIFF", index, total, path),
            PageStatus::Error => warn!("[{}/{}] {} ERROR", index, total, path),
        },
        ProgressEvent::BatchCompleted { completed, total } => {
            info!("Batch complete: {}/{} paths compared", completed, total);
        }
        ProgressEvent::GeneratingReport => info!("Generating report"),
        ProgressEvent::Completed { summary } => {
            info!(
                "Run complete: {} OK, {} DIFF, {} ERROR",
                summary.ok, summary.diff, summary.error
            );
        }
        ProgressEvent::Stopped { completed } => {
            warn!(
                "Run stopped after {} path{}",
                completed,
                if completed == 1 { "" } else { "s" }
            );
        }
        ProgressEvent::Failed { message } => error!("Run failed: {}", message),
    };

    match run_comparison(
        &config,
        &paths,
        Arc::clone(&client),
        Arc::clone(&stats),
        &observer,
        &handle,
    )
    .await
    {
        Ok(RunOutcome::Completed { records, summary }) => {
            let csv_target = if config.csv_out.as_os_str() == "-" {
                None
            } else {
                Some(config.csv_out.as_path())
            };
            write_csv(&records, csv_target).context("Failed to write CSV report")?;
            if let Some(jsonl_out) = &config.jsonl_out {
                write_jsonl(&records, jsonl_out).context("Failed to write JSONL report")?;
            }

            let groups = group_by_canonical(&records, mapping.as_ref());
            print_group_summary(&groups);
            print_processing_statistics(&stats);

            // Print user-friendly summary
            println!(
                "✅ Compared {} page{} ({} OK, {} DIFF, {} ERROR) - report in {}",
                summary.total,
                if summary.total == 1 { "" } else { "s" },
                summary.ok,
                summary.diff,
                summary.error,
                match csv_target {
                    Some(path) => path.display().to_string(),
                    None => "stdout".to_string(),
                }
            );
            Ok(())
        }
        Ok(RunOutcome::Stopped { records }) => {
            print_processing_statistics(&stats);
            println!(
                "⚠️ Stopped early after {} page{} compared - no report written",
                records.len(),
                if records.len() == 1 { "" } else { "s" }
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("site_parity error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Primes both hosts' caches before the comparison pass.
///
/// Warmup uses its own redirect-following client and a longer timeout, since
/// a cold origin may render slowly. Failures are logged and ignored.
async fn warm_sites(client: &reqwest::Client, config: &Config, paths: &[String]) {
    info!(
        "Warming caches for {} path{} on both hosts",
        paths.len(),
        if paths.len() == 1 { "" } else { "s" }
    );
    for path in paths {
        let (prod, dev) = tokio::join!(
            warm_page(client, &config.prod_base, path),
            warm_page(client, &config.dev_base, path),
        );
        if prod.is_none() || dev.is_none() {
            warn!("Warmup incomplete for {}", path);
        }
    }
}
