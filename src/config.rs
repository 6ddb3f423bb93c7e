//! Configuration management for openai-cli.
//!
//! Configuration is loaded from `~/.config/openai-cli/config.toml`. The
//! only setting is the API key; the `OPENAI_API_KEY` environment
//! variable takes precedence over it when set.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API key for api.openai.com (prefer the OPENAI_API_KEY env var).
    #[serde(default)]
    pub key: Option<String>,
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("openai-cli"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, using defaults if not found.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Resolve the API key: environment first, then the config file.
    /// An empty result is passed through as-is; the remote endpoint is
    /// the one that rejects unauthenticated calls.
    pub fn api_key(&self) -> String {
        resolve_key(std::env::var("OPENAI_API_KEY").ok(), self.key.clone())
    }
}

fn resolve_key(env: Option<String>, file: Option<String>) -> String {
    env.filter(|k| !k.is_empty())
        .or(file)
        .unwrap_or_default()
}
