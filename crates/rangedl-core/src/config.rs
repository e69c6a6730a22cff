use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::request::CurlOptions;

/// Global configuration loaded from `~/.config/rangedl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangedlConfig {
    /// Receive buffer per range worker in bytes (chunk size handed to the writer).
    pub buffer_bytes: usize,
    /// Progress sampling / redraw interval in milliseconds.
    pub progress_interval_ms: u64,
    /// Connection establishment timeout in seconds. There is no overall transfer timeout.
    pub connect_timeout_secs: u64,
    /// Maximum redirects followed by the probe and by each range request.
    pub max_redirects: u32,
    /// Optional User-Agent header; libcurl sends none when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for RangedlConfig {
    fn default() -> Self {
        Self {
            buffer_bytes: 1024 * 1024,
            progress_interval_ms: 300,
            connect_timeout_secs: 30,
            max_redirects: 10,
            user_agent: None,
        }
    }
}

impl RangedlConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            buffer_size: self.buffer_bytes.max(1024),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms.max(1))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rangedl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RangedlConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<RangedlConfig> {
    if !path.exists() {
        let default_cfg = RangedlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: RangedlConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
