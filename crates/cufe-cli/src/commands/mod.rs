//! Subcommands.

pub mod config;
pub mod scan;
pub mod show;

use std::path::PathBuf;

use tracing::debug;

use cufe_core::models::config::CufeConfig;

/// Per-user configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cufe")
        .join("config.json")
}

/// The config file in effect: the explicit one, else the per-user one if it exists.
pub fn config_source(config_path: Option<&str>) -> Option<PathBuf> {
    match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(default_config_path()).filter(|path| path.exists()),
    }
}

/// Load the config file in effect, or defaults when there is none.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CufeConfig> {
    let config = match config_source(config_path) {
        Some(path) => {
            debug!("Using config file {}", path.display());
            CufeConfig::from_file(&path)?
        }
        None => CufeConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
