//! `starscan fetch` – list the metadata batch without downloading.
//!
//! Handy for checking the API key and seeing what a run would pull.

use anyhow::Result;
use starscan_core::api;
use starscan_core::config::StarscanConfig;

pub async fn run_fetch(cfg: &StarscanConfig) -> Result<()> {
    let tasks = api::fetch_tasks(cfg).await?;
    if tasks.is_empty() {
        println!("No image entries in this batch (videos only?). Try again.");
        return Ok(());
    }

    println!("📡 {} image(s) in the batch:", tasks.len());
    for task in &tasks {
        let date = task.date.as_deref().unwrap_or("????-??-??");
        let title = task.title.as_deref().unwrap_or("(untitled)");
        println!("  {}  {}  {}", date, title, task.url);
    }
    Ok(())
}
