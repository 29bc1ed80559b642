//! Concurrent download stage.
//!
//! All transfers are started together on the async runtime and awaited with an
//! order-preserving join: the returned filename list matches task order no
//! matter which transfer finished first. Any single failure (network, HTTP
//! status, storage) fails the whole stage; there is no retry and no partial
//! result list.

use anyhow::{Context, Result};
use futures_util::future::try_join_all;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::api::ImageTask;
use crate::progress::{emit, ProgressEvent, ProgressSender, Stage};

/// Downloads one image to `<dir>/<task.filename>`, truncating any previous
/// file so re-runs overwrite in place. Returns the destination filename.
async fn download_one(
    client: &reqwest::Client,
    task: &ImageTask,
    dir: &Path,
    progress: &ProgressSender,
) -> Result<String> {
    let response = client
        .get(&task.url)
        .send()
        .await
        .with_context(|| format!("GET {} failed", task.url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("GET {} returned HTTP {}", task.url, status);
    }

    let body = response
        .bytes()
        .await
        .with_context(|| format!("reading body of {} failed", task.url))?;

    let dest: PathBuf = dir.join(&task.filename);
    let mut file = tokio::fs::File::create(&dest)
        .await
        .with_context(|| format!("creating {} failed", dest.display()))?;
    file.write_all(&body)
        .await
        .with_context(|| format!("writing {} failed", dest.display()))?;
    file.flush().await?;

    tracing::debug!(
        url = %task.url,
        bytes = body.len(),
        "downloaded {}",
        task.filename
    );
    emit(
        progress,
        ProgressEvent::UnitDone {
            stage: Stage::Download,
            filename: task.filename.clone(),
        },
    );
    Ok(task.filename.clone())
}

/// Runs the download stage: every task's transfer is in flight at once, and
/// the stage returns once the slowest one finishes. The result list is in
/// task order. Concurrency is bounded only by the batch size.
pub async fn download_all(
    client: &reqwest::Client,
    tasks: &[ImageTask],
    dir: &Path,
    progress: &ProgressSender,
) -> Result<Vec<String>> {
    emit(
        progress,
        ProgressEvent::StageStart {
            stage: Stage::Download,
            total: tasks.len(),
        },
    );

    let transfers = tasks
        .iter()
        .map(|task| download_one(client, task, dir, progress));
    let filenames = try_join_all(transfers).await?;

    tracing::info!("download stage complete: {} file(s)", filenames.len());
    Ok(filenames)
}
