use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Served by the supervisor regardless of the configured endpoints.
pub const HEALTH_PATH: &str = "/health";

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
    /// Uses `~/.config/scrape-console/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("scrape-console").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

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
    /// - Poll interval is non-zero
    /// - Base URL parses
    /// - Endpoint paths are absolute, distinct, not reserved, and free of
    ///   route parameters
    /// - Log trimming keeps no more lines than the capacity
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.console.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "console.poll_interval_ms must be greater than zero".to_string(),
            });
        }

        if reqwest::Url::parse(&self.console.base_url).is_err() {
            return Err(ConfigError::ValidationError {
                message: format!("console.base_url '{}' is not a valid URL", self.console.base_url),
            });
        }

        let endpoints = self.endpoints.all();
        for (index, (name, path)) in endpoints.iter().enumerate() {
            if !path.starts_with('/') {
                return Err(ConfigError::ValidationError {
                    message: format!("endpoints.{} must start with '/' (got '{}')", name, path),
                });
            }
            if *path == HEALTH_PATH {
                return Err(ConfigError::ValidationError {
                    message: format!("endpoints.{} may not use reserved path '{}'", name, path),
                });
            }
            if path
                .split('/')
                .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
            {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "endpoints.{} has a segment starting with ':' or '*' (got '{}')",
                        name, path
                    ),
                });
            }
            if let Some((other, _)) = endpoints[..index].iter().find(|(_, p)| p == path) {
                return Err(ConfigError::ValidationError {
                    message: format!("endpoints.{} and endpoints.{} share path '{}'", other, name, path),
                });
            }
        }

        let supervisor = &self.supervisor;
        if supervisor.log_trim_to > supervisor.log_capacity {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "supervisor.log_trim_to ({}) exceeds supervisor.log_capacity ({})",
                    supervisor.log_trim_to, supervisor.log_capacity
                ),
            });
        }

        Ok(())
    }
}
