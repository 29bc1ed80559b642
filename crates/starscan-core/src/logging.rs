//! Logging init: one shared log file under the XDG state dir.
//!
//! The progress bars own the terminal during a run, so log output goes to
//! `~/.local/state/starscan/starscan.log`. Analysis worker processes open the
//! same file in append mode, interleaving with the parent run; the pid logged
//! at init tells the streams apart.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,starscan=debug"))
}

/// Path of the shared log file, creating the state dir if needed.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("starscan")?;
    let log_dir = xdg_dirs.get_state_home().join("starscan");
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir.join("starscan.log"))
}

/// Initialize structured logging to the shared log file. Append mode keeps
/// concurrent worker processes from clobbering each other's lines. On failure
/// (e.g. state dir unwritable), returns Err so the caller can fall back to
/// stderr.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!(
        pid = std::process::id(),
        "starscan logging to {}",
        path.display()
    );
    Ok(())
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails
/// so the CLI doesn't crash.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
