//! Backend connection settings.

use derive_getters::Getters;
use sequin_error::{ConfigError, SequinResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Base URL used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the backend base URL.
pub const ENV_BACKEND_URL: &str = "SEQUIN_BACKEND_URL";
/// Environment variable holding the bearer token.
pub const ENV_API_TOKEN: &str = "SEQUIN_API_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const ENV_REQUEST_TIMEOUT: &str = "SEQUIN_REQUEST_TIMEOUT_SECS";

/// Connection settings for the execution backend.
///
/// # Examples
///
/// ```
/// use sequin_client::BackendConfig;
///
/// let config = BackendConfig::builder()
///     .base_url("http://backend:9000")
///     .build();
/// assert_eq!(config.base_url(), "http://backend:9000");
/// assert_eq!(*config.request_timeout_secs(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, TypedBuilder)]
pub struct BackendConfig {
    /// Base URL of the backend API
    #[serde(default = "default_base_url")]
    #[builder(default = DEFAULT_BACKEND_URL.to_string(), setter(into))]
    base_url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    #[builder(default, setter(strip_option, into))]
    api_token: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    #[builder(default = DEFAULT_TIMEOUT_SECS)]
    request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    backend: BackendConfig,
}

impl BackendConfig {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout variable is not a whole number.
    #[tracing::instrument]
    pub fn from_env() -> SequinResult<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Load settings from the `[backend]` table of a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[tracing::instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> SequinResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e)).with_path(path)
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            ConfigError::new(format!("Failed to parse config: {}", e)).with_path(path)
        })?;
        Ok(file.backend)
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for these settings.
    pub fn from_toml(content: &str) -> SequinResult<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        Ok(file.backend)
    }

    /// Apply values from a variable lookup on top of these settings.
    ///
    /// Unset or blank variables leave the current value in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout variable is not a whole number.
    pub fn with_overrides<F>(mut self, lookup: F) -> SequinResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            self.base_url = url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs = secs.trim().parse().map_err(|e| {
                ConfigError::new(format!(
                    "Expected a whole number of seconds, got '{}': {}",
                    secs, e
                ))
                .with_setting(ENV_REQUEST_TIMEOUT)
            })?;
        }
        Ok(self)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
