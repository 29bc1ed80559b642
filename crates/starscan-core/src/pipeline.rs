//! Pipeline orchestration: metadata fetch, then the concurrent download
//! stage, then the parallel analysis stage, then the summary.
//!
//! The stages do not overlap: analysis of the first image never starts before
//! the download stage as a whole has returned. That keeps the I/O-bound and
//! CPU-bound phases cleanly separated at the cost of some throughput. Any
//! single failure in either stage fails the whole run; there is no retry and
//! no partial-success mode.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api;
use crate::config::StarscanConfig;
use crate::download;
use crate::pool::{self, WorkerCommand, WorkerOutput};
use crate::progress::ProgressSender;

/// Final report data for one run.
#[derive(Debug)]
pub struct RunSummary {
    /// Per-file detection results, in task order.
    pub results: Vec<WorkerOutput>,
    /// Number of files downloaded (equals `results.len()` on success).
    pub downloaded: usize,
    /// Total wall-clock time for the run.
    pub elapsed: Duration,
}

/// Runs the whole pipeline with the given worker command factory (the CLI
/// points it at its own binary's hidden `worker` mode).
pub async fn run_pipeline(
    cfg: &StarscanConfig,
    factory: Arc<dyn WorkerCommand>,
    progress: ProgressSender,
) -> Result<RunSummary> {
    let start = Instant::now();

    std::fs::create_dir_all(&cfg.download_dir).with_context(|| {
        format!("creating download dir {} failed", cfg.download_dir.display())
    })?;
    std::fs::create_dir_all(&cfg.processed_dir).with_context(|| {
        format!("creating processed dir {} failed", cfg.processed_dir.display())
    })?;

    let client = reqwest::Client::new();
    let entries = api::fetch_batch(
        &client,
        &cfg.api_url,
        &cfg.effective_api_key(),
        cfg.count,
    )
    .await?;
    let tasks = api::image_tasks(&entries);
    tracing::info!(
        "metadata fetch: {} entries, {} image task(s)",
        entries.len(),
        tasks.len()
    );

    let files = download::download_all(&client, &tasks, &cfg.download_dir, &progress).await?;
    let downloaded = files.len();

    let workers = cfg.workers.unwrap_or_else(pool::default_workers);
    let results = pool::analyze_all(&files, workers, factory, &progress).await?;

    Ok(RunSummary {
        results,
        downloaded,
        elapsed: start.elapsed(),
    })
}
