//! CLI for the starscan pipeline.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use starscan_core::config;
use std::path::PathBuf;

use commands::{run_fetch, run_pipeline_cmd, run_worker};

/// Top-level CLI for the starscan pipeline.
#[derive(Debug, Parser)]
#[command(name = "starscan")]
#[command(about = "starscan: fetch a batch of APOD images and count their stars", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a batch of images, download them, and analyze them in parallel.
    Run {
        /// Number of images to request (overrides config).
        #[arg(long, value_name = "N")]
        count: Option<usize>,
        /// Directory raw downloads are written to (overrides config).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        /// Directory annotated images are written to (overrides config).
        #[arg(long, value_name = "DIR")]
        processed_dir: Option<PathBuf>,
        /// Number of analysis worker processes (default: one per core).
        #[arg(long, value_name = "N")]
        workers: Option<usize>,
    },

    /// Fetch and list the metadata batch without downloading anything.
    Fetch {
        /// Number of images to request (overrides config).
        #[arg(long, value_name = "N")]
        count: Option<usize>,
    },

    /// Internal per-file analysis worker (spawned by `run`).
    #[command(hide = true)]
    Worker {
        /// Downloaded image to analyze.
        input: PathBuf,
        /// Where to write the annotated image.
        output: PathBuf,
        /// Luminance threshold for bright pixels (0-255).
        #[arg(long, default_value_t = 200)]
        threshold: u8,
        /// Minimum blob area in pixels.
        #[arg(long, default_value_t = 10)]
        min_area: u32,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Worker mode gets everything on the command line; the parent already
        // resolved the config, so don't touch it here.
        if let CliCommand::Worker {
            input,
            output,
            threshold,
            min_area,
        } = &cli.command
        {
            return run_worker(input, output, *threshold, *min_area);
        }

        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                count,
                download_dir,
                processed_dir,
                workers,
            } => {
                if let Some(n) = count {
                    cfg.count = n;
                }
                if let Some(dir) = download_dir {
                    cfg.download_dir = dir;
                }
                if let Some(dir) = processed_dir {
                    cfg.processed_dir = dir;
                }
                if let Some(n) = workers {
                    cfg.workers = Some(n);
                }
                run_pipeline_cmd(&cfg).await?;
            }
            CliCommand::Fetch { count } => {
                if let Some(n) = count {
                    cfg.count = n;
                }
                run_fetch(&cfg).await?;
            }
            CliCommand::Worker { .. } => unreachable!("handled before config load"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
