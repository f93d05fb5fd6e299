//! Client configuration.

use std::env;
use std::time::Duration;

use crate::error::ClientError;
use crate::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.petal.io";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`crate::ControlPlaneClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for transient HTTP failures.
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }

    /// Read configuration from `PETAL_API_KEY` and, optionally,
    /// `PETAL_API_BASE`.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = env::var("PETAL_API_KEY")
            .map_err(|_| ClientError::Config("PETAL_API_KEY is not set".to_string()))?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var("PETAL_API_BASE") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("key")
            .with_base_url("http://localhost:9090")
            .with_retry(RetryPolicy {
                max_attempts: 1,
                ..RetryPolicy::default()
            });
        assert_eq!(config.base_url, "http://localhost:9090");
        assert_eq!(config.retry.max_attempts, 1);
    }
}
