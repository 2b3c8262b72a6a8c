//! TOML config loader
//!
//! Reads the app config from an explicit path or the platform config
//! directory, falling back to defaults when no file exists. The defaults
//! carry the gate's contract deadlines.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::{debug, info};

use ux_core::config::AppConfig;

pub const DEFAULT_CONFIG_FILENAME: &str = "config.toml";

/// Platform config path: `<config_dir>/unixange/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("unixange").join(DEFAULT_CONFIG_FILENAME))
}

/// Load config from `path`, or from the default location when `None`.
/// A missing file is not an error; defaults apply.
pub async fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                debug!("no platform config dir; using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}
