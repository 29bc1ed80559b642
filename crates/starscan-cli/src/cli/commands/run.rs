//! `starscan run` – the full fetch / download / analyze pipeline, with a
//! progress bar per stage and a final summary.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use starscan_core::config::StarscanConfig;
use starscan_core::pipeline;
use starscan_core::pool::WorkerCommand;
use starscan_core::progress::ProgressEvent;
use std::sync::Arc;

fn stage_bar(label: &'static str, total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg:>12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("static progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(label);
    pb
}

/// Builds the command that analyzes one downloaded file: this binary's hidden
/// `worker` mode, with all parameters on the command line (nothing shared with
/// the child but argv in and one JSON line out).
fn worker_factory(cfg: &StarscanConfig) -> Result<Arc<dyn WorkerCommand>> {
    let exe = std::env::current_exe().context("resolving own executable failed")?;
    let detection = cfg.detection();
    let download_dir = cfg.download_dir.clone();
    let processed_dir = cfg.processed_dir.clone();

    Ok(Arc::new(move |filename: &str| {
        let mut cmd = tokio::process::Command::new(&exe);
        cmd.arg("worker")
            .arg(download_dir.join(filename))
            .arg(processed_dir.join(format!("detected_{}", filename)))
            .arg("--threshold")
            .arg(detection.luminance_threshold.to_string())
            .arg("--min-area")
            .arg(detection.min_blob_area.to_string());
        cmd
    }))
}

pub async fn run_pipeline_cmd(cfg: &StarscanConfig) -> Result<()> {
    let (progress_tx, mut progress_rx) =
        tokio::sync::mpsc::unbounded_channel::<ProgressEvent>();

    // One bar at a time: the stages never overlap, so a new StageStart
    // finishes the previous bar and replaces it.
    let progress_handle = tokio::spawn(async move {
        let mut bar: Option<ProgressBar> = None;
        while let Some(event) = progress_rx.recv().await {
            match event {
                ProgressEvent::StageStart { stage, total } => {
                    if let Some(prev) = bar.take() {
                        prev.finish();
                    }
                    bar = Some(stage_bar(stage.label(), total));
                }
                ProgressEvent::UnitDone { .. } => {
                    if let Some(pb) = &bar {
                        pb.inc(1);
                    }
                }
            }
        }
        if let Some(pb) = bar.take() {
            pb.finish();
        }
    });

    println!("📡 Requesting {} images from the APOD archive...", cfg.count);
    let factory = worker_factory(cfg)?;
    let result = pipeline::run_pipeline(cfg, factory, Some(progress_tx)).await;

    // The channel closes when the pipeline returns; wait for the bars to
    // settle before printing anything else.
    let _ = progress_handle.await;
    let summary = result?;

    println!("\n✨ Run summary");
    for entry in &summary.results {
        println!("🔍 Found {} stars in {}", entry.star_count, entry.filename);
    }
    println!(
        "\n🎉 Completed in {:.2}s ({} downloaded, {} analyzed)",
        summary.elapsed.as_secs_f64(),
        summary.downloaded,
        summary.results.len()
    );
    Ok(())
}
