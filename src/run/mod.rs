//! Run orchestration: batched fetching, comparison, and progress reporting.
//!
//! A run walks the configured paths in batches. Within a batch every path is
//! fetched from both hosts concurrently; between batches the run pauses for
//! the configured delay so neither origin gets hammered. Cancellation is
//! cooperative and only takes effect at batch boundaries, so a batch that has
//! started always finishes.

mod events;

pub use events::{ProgressEvent, ProgressObserver};

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Url;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

use crate::compare::compare_pages;
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::fetch::fetch_page;
use crate::models::{ComparisonRecord, RunSummary};
use crate::report::summarize;

/// Cancellation handle for an in-flight comparison run.
///
/// Cloneable; any clone can request cancellation and all clones observe it.
/// The run honors the request at the next batch boundary, so pages already in
/// flight complete first and their records are kept.
#[derive(Debug, Clone, Default)]
pub struct RunHandle {
    token: CancellationToken,
}

impl RunHandle {
    /// Creates a fresh handle with no cancellation requested.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

/// How a comparison run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every path was compared.
    Completed {
        /// One record per path, in input order.
        records: Vec<ComparisonRecord>,
        /// Aggregate counts over `records`.
        summary: RunSummary,
    },
    /// Cancellation stopped the run at a batch boundary.
    Stopped {
        /// Records for the batches that finished before the stop.
        records: Vec<ComparisonRecord>,
    },
}

/// Runs the comparison over every path against both hosts.
///
/// Records come back in input path order regardless of how requests
/// interleave. Per-page failures never abort the run; they surface as
/// `ERROR` records. The returned error covers setup problems only, such as
/// an unparseable base URL, and is also reported through the observer as a
/// `Failed` event.
pub async fn run_comparison(
    config: &Config,
    paths: &[String],
    client: Arc<reqwest::Client>,
    stats: Arc<ProcessingStats>,
    observer: &dyn ProgressObserver,
    handle: &RunHandle,
) -> Result<RunOutcome> {
    match drive_run(config, paths, client, stats, observer, handle).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            observer.on_event(ProgressEvent::Failed {
                message: format!("{:#}", e),
            });
            Err(e)
        }
    }
}

async fn drive_run(
    config: &Config,
    paths: &[String],
    client: Arc<reqwest::Client>,
    stats: Arc<ProcessingStats>,
    observer: &dyn ProgressObserver,
    handle: &RunHandle,
) -> Result<RunOutcome> {
    Url::parse(&config.prod_base)
        .with_context(|| format!("invalid production base URL '{}'", config.prod_base))?;
    Url::parse(&config.dev_base)
        .with_context(|| format!("invalid development base URL '{}'", config.dev_base))?;

    let total = paths.len();
    observer.on_event(ProgressEvent::Started { total });

    let batch_size = config.batch_size.max(1);
    let delay = Duration::from_millis(config.batch_delay_ms);
    let checks = config.check_set();
    let mut records: Vec<ComparisonRecord> = Vec::with_capacity(total);

    for (batch_index, batch) in paths.chunks(batch_size).enumerate() {
        if handle.is_cancelled() {
            observer.on_event(ProgressEvent::Stopped {
                completed: records.len(),
            });
            return Ok(RunOutcome::Stopped { records });
        }

        if batch_index > 0 && !delay.is_zero() {
            // The inter-batch pause races against cancellation so a stop
            // request does not sit out the full delay
            tokio::select! {
                _ = sleep(delay) => {}
                _ = handle.cancelled() => {
                    observer.on_event(ProgressEvent::Stopped {
                        completed: records.len(),
                    });
                    return Ok(RunOutcome::Stopped { records });
                }
            }
        }

        let batch_start = records.len();
        let comparisons = batch.iter().enumerate().map(|(offset, path)| {
            let client = &client;
            let stats = &stats;
            let checks = &checks;
            async move {
                let (prod, dev) = tokio::join!(
                    fetch_page(client, &config.prod_base, path, checks, stats),
                    fetch_page(client, &config.dev_base, path, checks, stats),
                );
                let record = compare_pages(&prod, &dev, checks);
                observer.on_event(ProgressEvent::PageCompared {
                    index: batch_start + offset + 1,
                    total,
                    path: record.path.clone(),
                    status: record.status,
                });
                record
            }
        });
        // join_all keeps input order, so records line up with paths
        let mut batch_records = futures::future::join_all(comparisons).await;
        records.append(&mut batch_records);

        observer.on_event(ProgressEvent::BatchCompleted {
            completed: records.len(),
            total,
        });
    }

    observer.on_event(ProgressEvent::GeneratingReport);
    let summary = summarize(&records);
    observer.on_event(ProgressEvent::Completed { summary });

    Ok(RunOutcome::Completed { records, summary })
}
