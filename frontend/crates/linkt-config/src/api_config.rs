use crate::{ConfigError, ConfigErrorResult, DEFAULT_BASE_URL};

use std::time::Duration;

use serde::Deserialize;

// Request timeout constraints (only checked when a timeout is set)
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where the REST backend lives and how requests to it behave
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.base_url.starts_with("https://") {
            return Err(ConfigError::api(format!(
                "api.base_url '{}' uses https://, but this build has no TLS support; \
                 put a TLS-terminating proxy in front and use http://",
                self.base_url
            )));
        }

        if !self.base_url.starts_with("http://") {
            return Err(ConfigError::api(format!(
                "api.base_url must start with http://, got '{}'",
                self.base_url
            )));
        }

        if let Some(timeout) = self.request_timeout_secs
            && !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS).contains(&timeout)
        {
            return Err(ConfigError::api(format!(
                "api.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, timeout
            )));
        }

        Ok(())
    }
}
