use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `<config_dir>/uxcases/config.toml` via `dirs::config_dir()`,
    /// falling back to the current directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("uxcases").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - splash bounds are ordered and non-zero
    /// - article delay range is ordered
    /// - the bind address parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        let splash = &self.splash;
        if splash.max_duration_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "splash.max_duration_ms must be greater than zero".to_string(),
            });
        }

        if splash.min_duration_ms > splash.max_duration_ms {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "splash.min_duration_ms ({}) exceeds splash.max_duration_ms ({})",
                    splash.min_duration_ms, splash.max_duration_ms
                ),
            });
        }

        if splash.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "splash.tick_interval_ms must be greater than zero".to_string(),
            });
        }

        let fetch = &self.fetch;
        if fetch.article_delay_min_ms > fetch.article_delay_max_ms {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "fetch.article_delay_min_ms ({}) exceeds fetch.article_delay_max_ms ({})",
                    fetch.article_delay_min_ms, fetch.article_delay_max_ms
                ),
            });
        }

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid bind address '{}'", self.server.bind_addr),
            });
        }

        Ok(())
    }
}
