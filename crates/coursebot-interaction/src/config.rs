//! Configuration file management for coursebot.
//!
//! Reads `~/.config/coursebot/config.toml`; a missing file means defaults.
//! Environment variables override file values.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use coursebot_core::ChatbotError;
use coursebot_core::config::WidgetConfig;
use coursebot_core::error::Result;

pub const ENV_BASE_URL: &str = "COURSEBOT_BASE_URL";
pub const ENV_COOKIE: &str = "COURSEBOT_COOKIE";
pub const ENV_TRANSCRIPT: &str = "COURSEBOT_TRANSCRIPT";

/// Loads the configuration from `path`, or the default location when `None`.
pub fn load_config(path: Option<&Path>) -> Result<WidgetConfig> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    let mut config = if config_path.exists() {
        let content = fs::read_to_string(&config_path).map_err(|e| {
            ChatbotError::config(format!(
                "Failed to read configuration file at {}: {}",
                config_path.display(),
                e
            ))
        })?;
        WidgetConfig::from_toml_str(&content)?
    } else {
        tracing::debug!(path = %config_path.display(), "No configuration file, using defaults");
        WidgetConfig::default()
    };

    apply_overrides(&mut config, |key| env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Applies `COURSEBOT_*` overrides looked up through `lookup`.
pub fn apply_overrides<F>(config: &mut WidgetConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(cookie) = lookup(ENV_COOKIE) {
        config.cookie = Some(cookie);
    }
    if let Some(transcript) = lookup(ENV_TRANSCRIPT) {
        config.default_transcript = Some(transcript);
    }
}

/// Returns the path to the configuration file: ~/.config/coursebot/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| ChatbotError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("coursebot").join("config.toml"))
}
