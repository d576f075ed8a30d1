use std::path::Path;

use anyhow::Result;
use coursebot_interaction::config::{default_config_path, load_config};

/// Prints the effective configuration, overrides included.
pub fn show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

pub fn path(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    let state = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("{}{}", path.display(), state);
    Ok(())
}
