//! Config file defaults for the CLI
//!
//! Values are resolved with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (CODEVF_*)
//! 3. Config file (~/.config/codevf/config.toml)
//! 4. Built-in defaults
//!
//! Flag and environment resolution happens in `main.rs` (clap handles both);
//! this module only covers the file layer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Defaults read from the config file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default project to file tasks under
    pub project_id: Option<u64>,

    /// Default credit ceiling per task
    pub max_credits: Option<u32>,

    /// Default service mode
    pub mode: Option<String>,

    /// Default polling interval, e.g. "2s" or "500ms"
    #[serde(with = "humantime_serde")]
    pub poll_interval: Option<Duration>,

    /// Default API base URL
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Load from the default config file location
    ///
    /// Returns empty defaults if the file doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load from a specific file
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/codevf/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codevf").join("config.toml"))
    }
}
