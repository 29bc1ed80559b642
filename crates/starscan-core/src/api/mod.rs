//! APOD metadata client.
//!
//! One GET against the configured endpoint with `api_key` and `count` query
//! parameters; the JSON array of entries is filtered down to the ordered list
//! of image download tasks.

mod model;

pub use model::ApodEntry;

use anyhow::{Context, Result};

use crate::config::StarscanConfig;
use crate::filename;

/// A single image to download: immutable, created once per metadata entry.
#[derive(Debug, Clone)]
pub struct ImageTask {
    /// Position in the batch; also drives the destination filename.
    pub index: usize,
    /// Resolved image URL (hdurl preferred over url).
    pub url: String,
    /// Destination filename, e.g. `space_0.jpg`.
    pub filename: String,
    /// Entry title, for listing.
    pub title: Option<String>,
    /// Entry date, for listing.
    pub date: Option<String>,
}

/// Fetches a batch of `count` APOD entries from `api_url`.
pub async fn fetch_batch(
    client: &reqwest::Client,
    api_url: &str,
    api_key: &str,
    count: usize,
) -> Result<Vec<ApodEntry>> {
    let count = count.to_string();
    let response = client
        .get(api_url)
        .query(&[("api_key", api_key), ("count", count.as_str())])
        .send()
        .await
        .with_context(|| format!("metadata request to {} failed", api_url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("metadata endpoint {} returned HTTP {}", api_url, status);
    }

    let entries: Vec<ApodEntry> = response
        .json()
        .await
        .context("metadata response was not a JSON entry array")?;
    tracing::debug!("metadata endpoint returned {} entries", entries.len());
    Ok(entries)
}

/// Builds the ordered download task list from a batch of entries.
///
/// Non-image entries (videos) and entries without a usable URL are skipped;
/// indices are assigned after filtering so destination filenames stay dense.
pub fn image_tasks(entries: &[ApodEntry]) -> Vec<ImageTask> {
    entries
        .iter()
        .filter(|e| e.is_image())
        .filter_map(|e| e.image_url().map(|url| (e, url.to_string())))
        .enumerate()
        .map(|(index, (entry, url))| ImageTask {
            index,
            filename: filename::task_filename(index, &url),
            url,
            title: entry.title.clone(),
            date: entry.date.clone(),
        })
        .collect()
}

/// Fetches a batch with a fresh client and builds the task list. Used by the
/// CLI's `fetch` listing; the pipeline shares one client across the metadata
/// call and the downloads instead.
pub async fn fetch_tasks(cfg: &StarscanConfig) -> Result<Vec<ImageTask>> {
    let client = reqwest::Client::new();
    let entries = fetch_batch(&client, &cfg.api_url, &cfg.effective_api_key(), cfg.count).await?;
    Ok(image_tasks(&entries))
}
