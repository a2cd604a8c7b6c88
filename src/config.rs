//! Configuration loading
//!
//! Reads `~/.config/hivestats/config.toml`. A missing file is not an error:
//! every section falls back to its defaults.

mod types;

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use reqwest::Url;

pub use types::{Config, LedgerConfig, RefreshConfig, SamplingConfig};
pub use types::{
    DEFAULT_ACTIVE_ACCOUNT_PERCENT, DEFAULT_ENDPOINTS, DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE,
};

use crate::error::ConfigError;

const CONFIG_DIR: &str = "hivestats";
const CONFIG_FILE: &str = "config.toml";

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config from the default location
pub fn load_config() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) => load_config_from_path(&path),
        None => {
            log::debug!("No home directory, using default config");
            Ok(Config::default())
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == IoErrorKind::NotFound => {
            log::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    parse_config(&contents)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Check the invariants the fetcher and client rely on
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.ledger.endpoints.is_empty() {
        return Err(ConfigError::Invalid(
            "at least one ledger endpoint is required".to_string(),
        ));
    }

    for endpoint in &config.ledger.endpoints {
        Url::parse(endpoint).map_err(|e| {
            ConfigError::Invalid(format!("invalid endpoint URL '{}': {}", endpoint, e))
        })?;
    }

    if config.ledger.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "timeout_secs must be at least 1".to_string(),
        ));
    }

    if config.sampling.window_size == 0 {
        return Err(ConfigError::Invalid(
            "window_size must be at least 1".to_string(),
        ));
    }

    if config.sampling.window_size > MAX_WINDOW_SIZE {
        return Err(ConfigError::Invalid(format!(
            "window_size must be at most {}, got {}",
            MAX_WINDOW_SIZE, config.sampling.window_size
        )));
    }

    if config.sampling.active_account_percent > 100 {
        return Err(ConfigError::Invalid(format!(
            "active_account_percent must be between 0 and 100, got {}",
            config.sampling.active_account_percent
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
