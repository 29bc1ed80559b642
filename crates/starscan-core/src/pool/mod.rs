//! Parallel analysis stage: a fixed pool of independent worker processes.
//!
//! Each unit of work is one downloaded file, analyzed by spawning a fresh
//! worker process (the CLI's hidden `worker` mode); nothing is shared between
//! units except the command line in and one JSON result line out. Pool width
//! is enforced with a semaphore, default one worker per core. Results come
//! back in input order; the first failed unit fails the stage once all units
//! have settled, after completed units have already fired their progress
//! events.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::progress::{emit, ProgressEvent, ProgressSender, Stage};

/// Result of analyzing one file, passed across the process boundary as a
/// single JSON line on the worker's stdout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerOutput {
    /// The analyzed filename.
    pub filename: String,
    /// Number of stars detected.
    pub star_count: usize,
}

/// Builds the worker command for one filename. The CLI points this at its own
/// binary's hidden `worker` subcommand; tests substitute a stub command.
pub trait WorkerCommand: Send + Sync + 'static {
    fn command(&self, filename: &str) -> tokio::process::Command;
}

impl<F> WorkerCommand for F
where
    F: Fn(&str) -> tokio::process::Command + Send + Sync + 'static,
{
    fn command(&self, filename: &str) -> tokio::process::Command {
        self(filename)
    }
}

/// One worker per available core when no override is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Spawns the worker process for `filename` and parses its result line.
async fn run_worker(factory: &dyn WorkerCommand, filename: &str) -> Result<WorkerOutput> {
    let mut command = factory.command(filename);
    command.stdout(Stdio::piped()).stderr(Stdio::piped());

    let output = command
        .output()
        .await
        .with_context(|| format!("spawning worker for {} failed", filename))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "worker for {} exited with {}: {}",
            filename,
            output.status,
            stderr.trim()
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .with_context(|| format!("worker for {} produced no output", filename))?;
    let result: WorkerOutput = serde_json::from_str(line.trim())
        .with_context(|| format!("worker result for {} was not valid JSON", filename))?;
    Ok(result)
}

/// Runs the analysis stage over `files` with at most `workers` processes in
/// flight. Each completed unit fires a progress event the moment its result
/// arrives; if any unit fails, the stage waits for the rest to settle and then
/// returns the first failure in input order (no cancellation).
pub async fn analyze_all(
    files: &[String],
    workers: usize,
    factory: Arc<dyn WorkerCommand>,
    progress: &ProgressSender,
) -> Result<Vec<WorkerOutput>> {
    emit(
        progress,
        ProgressEvent::StageStart {
            stage: Stage::Analyze,
            total: files.len(),
        },
    );

    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut join_set = JoinSet::new();

    for (index, filename) in files.iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        let factory = Arc::clone(&factory);
        let filename = filename.clone();
        let progress = progress.clone();
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("analysis semaphore closed");
            let result = run_worker(factory.as_ref(), &filename).await;
            if result.is_ok() {
                emit(
                    &progress,
                    ProgressEvent::UnitDone {
                        stage: Stage::Analyze,
                        filename,
                    },
                );
            }
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<WorkerOutput>>> =
        (0..files.len()).map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        let (index, result) =
            joined.map_err(|e| anyhow::anyhow!("analysis task join: {}", e))?;
        slots[index] = Some(result);
    }

    let mut results = Vec::with_capacity(files.len());
    for (index, slot) in slots.into_iter().enumerate() {
        let result = slot
            .with_context(|| format!("analysis unit {} never reported", index))??;
        results.push(result);
    }

    tracing::info!("analysis stage complete: {} file(s)", results.len());
    Ok(results)
}
