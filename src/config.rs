//! Environment overrides for the settings panel
//!
//! The settings file normally lives in the platform config directory (see
//! `FileStore::default_path`). Environment variables (all optional):
//! - TWOFACTOR_SETTINGS_CONFIG: path of the settings file to use instead

use crate::store::FileStore;
use anyhow::Result;
use log::{debug, info, warn};
use std::env;
use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "TWOFACTOR_SETTINGS_CONFIG";

/// Parse the TWOFACTOR_SETTINGS_CONFIG environment variable
///
/// Returns None if not set, empty, or not valid unicode
pub fn parse_config_path() -> Option<PathBuf> {
    match env::var(CONFIG_PATH_ENV) {
        Ok(val) if val.trim().is_empty() => {
            warn!("{} is set but empty. Using default location.", CONFIG_PATH_ENV);
            None
        }
        Ok(val) => {
            info!("Settings file set via environment variable: {}", val);
            Some(PathBuf::from(val))
        }
        Err(env::VarError::NotUnicode(_)) => {
            warn!("{} is not valid unicode. Using default location.", CONFIG_PATH_ENV);
            None
        }
        Err(env::VarError::NotPresent) => {
            debug!("{} not set.", CONFIG_PATH_ENV);
            None
        }
    }
}

/// Resolve the settings file path (precedence: CLI arg > env var > default)
pub fn resolve_config_path(cli_path: Option<PathBuf>) -> Result<PathBuf> {
    match cli_path.or_else(parse_config_path) {
        Some(path) => Ok(path),
        None => FileStore::default_path(),
    }
}
