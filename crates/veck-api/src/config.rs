//! Configuration loading for veck.
//!
//! Config lives at `$VECK_HOME/config.toml` (default `~/.veck/config.toml`).
//! Environment variables `VECK_BASE_URL` and `VECK_MODEL` override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MODEL: &str = "llama2";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Model name forwarded to the generate endpoint.
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Loads config from disk, applies env overrides, validates the URL.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load() -> Result<Self> {
        let mut config = Self::read(&config_path())?;

        if let Ok(base_url) = std::env::var("VECK_BASE_URL")
            && !base_url.trim().is_empty()
        {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("VECK_MODEL")
            && !model.trim().is_empty()
        {
            config.model = model;
        }

        config.base_url = normalize_base_url(&config.base_url)?;
        Ok(config)
    }

    /// Reads and parses a config file; a missing file yields defaults.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Writes a default config file, failing if one already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(&Self::default())
            .context("failed to serialize default config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Root directory for veck state: `$VECK_HOME` or `~/.veck`.
pub fn veck_home() -> PathBuf {
    if let Ok(home) = std::env::var("VECK_HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".veck")
}

pub fn config_path() -> PathBuf {
    veck_home().join("config.toml")
}

/// Validates a base URL (http or https only) and strips any trailing slash.
///
/// `Config::load` runs the configured URL through this; CLI overrides must
/// go through it too.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("invalid base URL: {raw}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("base URL must be http or https, got {}", url.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}
