//! Carrier connection settings
//!
//! Settings come from code, from `DHL_*` environment variables or, with the
//! `config-file` feature, from a TOML file:
//!
//! ```toml
//! base_url = "https://express.api.dhl.com/mydhlapi/test/"
//! username = "apiuser"
//! password = "s3cret"
//! timeout_seconds = 20
//! ```

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::auth::{BasicCredentials, CredentialProvider};
use crate::transport::TransportResult;

/// Production base URL of the DHL Express API
pub const PRODUCTION_BASE_URL: &str = "https://express.api.dhl.com/mydhlapi/";

/// Sandbox base URL of the DHL Express API
pub const TEST_BASE_URL: &str = "https://express.api.dhl.com/mydhlapi/test/";

/// Tracking language used when a request does not name one
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ara";

pub const ENV_BASE_URL: &str = "DHL_BASE_URL";
pub const ENV_USERNAME: &str = "DHL_USERNAME";
pub const ENV_PASSWORD: &str = "DHL_PASSWORD";
pub const ENV_TIMEOUT_SECONDS: &str = "DHL_TIMEOUT_SECONDS";
pub const ENV_ACCEPT_LANGUAGE: &str = "DHL_ACCEPT_LANGUAGE";

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVariable(String),

    #[error("Invalid value '{value}' for {name}")]
    InvalidValue { name: String, value: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

/// Connection settings for the carrier API
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct CarrierConfig {
    pub base_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Default request timeout; 0 disables it
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.to_string()
}

impl CarrierConfig {
    /// Settings for `base_url` with empty credentials
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: String::new(),
            password: String::new(),
            timeout_seconds: default_timeout_seconds(),
            accept_language: default_accept_language(),
        }
    }

    pub fn production() -> Self {
        Self::new(PRODUCTION_BASE_URL)
    }

    pub fn test() -> Self {
        Self::new(TEST_BASE_URL)
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = language.into();
        self
    }

    /// Default request timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    /// Load from `DHL_BASE_URL`, `DHL_USERNAME`, `DHL_PASSWORD` and the
    /// optional `DHL_TIMEOUT_SECONDS` / `DHL_ACCEPT_LANGUAGE`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Same as [`CarrierConfig::from_env`], reading variables through `lookup`
    pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingVariable(name.to_string()))
        };

        let mut config = Self::new(require(ENV_BASE_URL)?)
            .with_credentials(require(ENV_USERNAME)?, require(ENV_PASSWORD)?);

        if let Some(value) = lookup(ENV_TIMEOUT_SECONDS) {
            config.timeout_seconds = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_TIMEOUT_SECONDS.to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(language) = lookup(ENV_ACCEPT_LANGUAGE) {
            config.accept_language = language;
        }

        Ok(config)
    }

    /// Parse TOML settings
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load TOML settings from `path`
    #[cfg(feature = "config-file")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn credentials(&self) -> BasicCredentials {
        BasicCredentials::new(self.username.clone(), self.password.clone())
    }
}

impl fmt::Debug for CarrierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("accept_language", &self.accept_language)
            .finish()
    }
}

impl CredentialProvider for CarrierConfig {
    fn credentials(&self) -> TransportResult<BasicCredentials> {
        Ok(CarrierConfig::credentials(self))
    }
}
