//! Configuration for linkshelf
//!
//! Centralized configuration for the remote API, view paging, reload timing
//! after mutations, and backup file naming.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `api.endpoint`.
pub const ENDPOINT_ENV: &str = "LINKSHELF_ENDPOINT";

/// System-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkshelfConfig {
    /// Remote API settings
    pub api: ApiConfig,
    /// Listing settings
    pub view: ViewConfig,
    /// Reload timing and update policy
    pub sync: SyncConfig,
    /// Export settings
    pub backup: BackupConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Absolute http(s) URL of the link API. Empty means unconfigured.
    pub endpoint: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            user_agent: format!("linkshelf/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// Listing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Links per page
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// Post-mutation reload configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Delay before reloading after an add or update, in milliseconds
    pub reload_after_submit_ms: u64,
    /// Delay before reloading after a removal, in milliseconds
    pub reload_after_remove_ms: u64,
    /// Keep a link's identifier when it is updated (re-inserted)
    pub preserve_identifier_on_update: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            reload_after_submit_ms: 1000,
            reload_after_remove_ms: 500,
            preserve_identifier_on_update: true,
        }
    }
}

impl SyncConfig {
    pub fn reload_after_submit(&self) -> Duration {
        Duration::from_millis(self.reload_after_submit_ms)
    }

    pub fn reload_after_remove(&self) -> Duration {
        Duration::from_millis(self.reload_after_remove_ms)
    }
}

/// Backup configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// File name offered for exports
    pub file_name: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            file_name: crate::export::DEFAULT_BACKUP_FILE_NAME.to_string(),
        }
    }
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Could not serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    #[error("Invalid endpoint '{0}': expected an absolute http(s) URL")]
    InvalidEndpoint(String),
    #[error("No API endpoint configured; set api.endpoint or LINKSHELF_ENDPOINT")]
    MissingEndpoint,
}

impl LinkshelfConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a TOML file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Default location: `<config dir>/linkshelf/config.toml`
    pub fn standard_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("linkshelf").join("config.toml"))
    }

    /// Load from an explicit path, else the standard location when it
    /// exists, else defaults. The endpoint environment variable wins over
    /// any file.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_path(path)?,
            None => match Self::standard_path() {
                Some(path) if path.exists() => {
                    tracing::debug!(path = %path.display(), "loading config");
                    Self::from_path(&path)?
                }
                _ => Self::default(),
            },
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.api.endpoint = endpoint.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, with the environment override.
    pub fn load_standard() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view.page_size == 0 {
            return Err(ConfigError::OutOfRange(
                "view.page_size must be positive".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "api.timeout_secs must be positive".to_string(),
            ));
        }

        if !self.api.endpoint.is_empty() {
            validate_endpoint(&self.api.endpoint)?;
        }

        Ok(())
    }

    /// The endpoint, or an error when none is configured.
    pub fn require_endpoint(&self) -> Result<&str, ConfigError> {
        if self.api.endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        validate_endpoint(&self.api.endpoint)?;
        Ok(&self.api.endpoint)
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    match url::Url::parse(endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidEndpoint(endpoint.to_string())),
    }
}
