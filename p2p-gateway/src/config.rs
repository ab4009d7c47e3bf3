//! Gateway configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::retry::RetryPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid gateway mode '{0}' (expected 'mock' or 'live')")]
    InvalidMode(String),

    #[error("Invalid gateway base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Which adapter serves the `TransferGateway` port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayMode {
    #[default]
    Mock,
    Live,
}

impl FromStr for GatewayMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "live" | "real" => Ok(Self::Live),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Connection and retry settings for the live gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_version: String,
    pub api_key: Option<String>,
    /// Per-attempt timeout
    pub timeout: Duration,
    pub enable_retry: bool,
    /// Total attempts including the first one
    pub max_retry_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            api_version: "v1".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            enable_retry: true,
            max_retry_attempts: 3,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

impl GatewayConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL of the transfer endpoint.
    pub fn transfer_url(&self) -> Result<String, ConfigError> {
        let base = self.base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(base)
            .map_err(|_| ConfigError::InvalidBaseUrl(self.base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(format!(
            "{}/{}/payments/p2p-transfer",
            base,
            self.api_version.trim_matches('/')
        ))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        if self.enable_retry {
            RetryPolicy::new(self.max_retry_attempts, self.retry_delay)
        } else {
            RetryPolicy::no_retry()
        }
    }
}
