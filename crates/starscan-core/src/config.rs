use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "STARSCAN_API_KEY";

/// Blob detection parameters (optional section in config.toml).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Grayscale luminance above which a pixel counts as "bright" (0-255).
    pub luminance_threshold: u8,
    /// Minimum connected-component area in pixels for a blob to count as a star.
    pub min_blob_area: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            luminance_threshold: 200,
            min_blob_area: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/starscan/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarscanConfig {
    /// Base URL of the APOD metadata endpoint.
    pub api_url: String,
    /// API key sent with the metadata request. Overridden by `STARSCAN_API_KEY`.
    pub api_key: String,
    /// Number of images requested per run.
    pub count: usize,
    /// Directory raw downloads are written to (created if absent).
    pub download_dir: PathBuf,
    /// Directory annotated images are written to (created if absent).
    pub processed_dir: PathBuf,
    /// Optional detection parameters; if missing, built-in defaults are used.
    #[serde(default)]
    pub detection: Option<DetectionConfig>,
    /// Optional worker process count for the analysis stage (None = one per core).
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for StarscanConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.nasa.gov/planetary/apod".to_string(),
            api_key: "DEMO_KEY".to_string(),
            count: 10,
            download_dir: PathBuf::from("space_images"),
            processed_dir: PathBuf::from("processed_images"),
            detection: None,
            workers: None,
        }
    }
}

impl StarscanConfig {
    /// Detection parameters with defaults filled in.
    pub fn detection(&self) -> DetectionConfig {
        self.detection.unwrap_or_default()
    }

    /// API key after applying the environment override.
    pub fn effective_api_key(&self) -> String {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => key,
            _ => self.api_key.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("starscan")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, creating a default file (and its parent
/// directory) if none exists.
pub fn load_or_init_at(path: &Path) -> Result<StarscanConfig> {
    if !path.exists() {
        let default_cfg = StarscanConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: StarscanConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Load configuration from the XDG config dir, creating a default file if
/// none exists.
pub fn load_or_init() -> Result<StarscanConfig> {
    load_or_init_at(&config_path()?)
}
