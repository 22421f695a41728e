//! Configuration loading for iotframe-relay.
//!
//! Configuration is loaded from a TOML file (default: `configuration/configuration.toml`).

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "configuration/configuration.toml";

/// Root configuration for iotframe-relay.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Public URL prefix prepended to stored image references.
    #[serde(alias = "Root")]
    pub root: String,
    /// Shared secret required to issue a new identity.
    #[serde(alias = "Key")]
    pub key: String,
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Directory uploaded images are written to (default: images).
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    /// Per-request deadline in seconds (default: 15).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes (default: 16MB).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

// Default value functions
fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024 // 16MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: "http://localhost:8080".to_string(),
            key: "change-me".to_string(),
            server: ServerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Per-request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::Invalid {
                reason: "key must not be empty".to_string(),
            });
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                reason: "server.request_timeout_secs must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// Configuration parsed but is unusable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}
