//! Client configuration.
//!
//! A [`Config`] is validated once when a [`BlockScore`](crate::BlockScore) context is
//! built. Several contexts with different keys can live side by side.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::time::Duration;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BLOCKSCORE_API_KEY";
/// Environment variable overriding the API host.
pub const BASE_URL_ENV: &str = "BLOCKSCORE_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.blockscore.com";
pub const DEFAULT_API_VERSION: &str = "3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the API.
///
/// Can be deserialized (e.g. from a larger application config) or built
/// programmatically with [`Config::new`].
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Secret key, sent as the HTTP basic auth username.
    pub api_key: String,

    /// API host, without trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Version requested through the `Accept` media type.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout. Read from `timeout_secs`, which may be fractional.
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        deserialize_with = "deserialize_secs"
    )]
    pub timeout: Duration,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

fn deserialize_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            timeout: default_timeout(),
        }
    }

    /// Reads the key from `BLOCKSCORE_API_KEY` and, if set, the host from
    /// `BLOCKSCORE_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::Configuration(format!("{API_KEY_ENV} environment variable not set")))?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Versioned media type sent as `Accept`.
    pub fn accept_header(&self) -> String {
        format!("application/vnd.blockscore+json;version={}", self.api_version)
    }

    /// Checks the settings without touching the network.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Configuration("API key has not been set".into()));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(Error::Configuration(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::Configuration("timeout must be positive".into()));
        }
        Ok(())
    }
}

// Keeps the key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}
