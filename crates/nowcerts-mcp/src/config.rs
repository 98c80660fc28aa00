//! Server configuration.
//!
//! Configuration is loaded from the first of:
//! 1. the `--config` flag (or `NOWCERTS_CONFIG`),
//! 2. `~/.config/nowcerts-mcp/config.toml`.
//!
//! A missing file at the default location is not an error. Every key has a
//! default except the API key, which may also come from `NOWCERTS_API_KEY`.
//!
//! ## Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "https://test-null-ref-express.nowcerts.com"
//! api_key = "amp_ai_..."
//! timeout_secs = 4
//!
//! [cache]
//! ttl_secs = 300
//!
//! [list]
//! summary_limit = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use nowcerts_common::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

use crate::error::{Result, ServerError};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "NOWCERTS_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "NOWCERTS_BASE_URL";

/// Server configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub list: ListSettings,
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the NowCerts environment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static API key. Never written back out.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Per-request timeout in seconds (default: 4)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// List cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Freshness window in seconds (default: 300)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// List rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSettings {
    /// Records rendered into a list summary (default: 5)
    #[serde(default = "default_summary_limit")]
    pub summary_limit: usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            summary_limit: default_summary_limit(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

const fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

const fn default_summary_limit() -> usize {
    5
}

impl ServerConfig {
    /// Loads configuration, applies environment overrides and validates.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present and defaults apply otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit path does not exist
    /// - The file cannot be read or parsed
    /// - A value fails validation
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if !path.exists() => {
                return Err(ServerError::ConfigNotFound(path.to_path_buf()));
            }
            Some(path) => Self::from_file(path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No configuration file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Returns the default configuration file path, if a config directory exists.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nowcerts-mcp").join("config.toml"))
    }

    /// Overrides file values with environment values found by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api.api_key = Some(SecretString::new(key.into()));
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request timeout is zero
    /// - The summary limit is zero
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            return Err(ServerError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.list.summary_limit == 0 {
            return Err(ServerError::Config(
                "list.summary_limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Builds the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::MissingApiKey`] if no API key was configured.
    pub fn api_config(&self) -> Result<ApiConfig> {
        let api_key = self.api.api_key.clone().ok_or(ServerError::MissingApiKey)?;

        Ok(ApiConfig::from_secret(api_key)
            .with_base_url(self.api.base_url.clone())
            .with_timeout_seconds(self.api.timeout_secs))
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }
}
