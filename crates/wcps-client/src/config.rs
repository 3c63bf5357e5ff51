//! Client configuration.
//!
//! Loaded from a YAML file or from environment variables:
//!
//! ```yaml
//! server_url: https://ows.rasdaman.org/rasdaman/ows
//! request_timeout_secs: 120
//! max_retries: 3
//! ```

use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Connection settings for a coverage server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OWS endpoint queries are posted to.
    pub server_url: String,
    /// Whole-request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Retries after the first attempt for transient failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Initial retry delay (doubles each retry)
    #[serde(default = "default_initial_retry_delay")]
    pub initial_retry_delay_ms: u64,
    #[serde(default = "default_max_retry_delay")]
    pub max_retry_delay_ms: u64,
    /// WCS version used for GetCapabilities and DescribeCoverage.
    #[serde(default = "default_wcs_version")]
    pub wcs_version: String,
}

fn default_request_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_initial_retry_delay() -> u64 {
    500
}

fn default_max_retry_delay() -> u64 {
    8_000
}

fn default_wcs_version() -> String {
    "2.0.1".to_string()
}

impl ClientConfig {
    /// Default settings for the given endpoint.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_retries: default_max_retries(),
            initial_retry_delay_ms: default_initial_retry_delay(),
            max_retry_delay_ms: default_max_retry_delay(),
            wcs_version: default_wcs_version(),
        }
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: ClientConfig = serde_yaml::from_str(&content)?;
        config.validate()?;

        debug!(path = %path.display(), server_url = %config.server_url, "Loaded client config");
        Ok(config)
    }

    /// Build a configuration from `WCPS_SERVER_URL`, `WCPS_MAX_RETRIES`
    /// and `WCPS_TIMEOUT_SECS`.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with variables resolved by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup("WCPS_SERVER_URL")
            .ok_or_else(|| ClientError::Config("WCPS_SERVER_URL is not set".to_string()))?;
        let mut config = Self::new(server_url);

        if let Some(value) = lookup("WCPS_MAX_RETRIES") {
            config.max_retries = value
                .parse()
                .map_err(|_| ClientError::Config(format!("Invalid WCPS_MAX_RETRIES: {}", value)))?;
        }
        if let Some(value) = lookup("WCPS_TIMEOUT_SECS") {
            config.request_timeout_secs = value
                .parse()
                .map_err(|_| ClientError::Config(format!("Invalid WCPS_TIMEOUT_SECS: {}", value)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the server URL is an absolute http(s) URL.
    pub fn validate(&self) -> ClientResult<Url> {
        let url = Url::parse(&self.server_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.server_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidUrl(format!(
                "{}: unsupported scheme '{}'",
                self.server_url, other
            ))),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn initial_retry_delay(&self) -> Duration {
        Duration::from_millis(self.initial_retry_delay_ms)
    }

    pub fn max_retry_delay(&self) -> Duration {
        Duration::from_millis(self.max_retry_delay_ms)
    }
}
