//! Client configuration.
//!
//! [`ClientConfig`] carries everything the shared HTTP client needs. It can be
//! built in code, deserialized from a config file, or read from `TEMU_*`
//! environment variables with [`ClientConfig::from_env`].

use std::time::Duration;

use reqwest_retry::Jitter;
use reqwest_retry::policies::ExponentialBackoff;
use serde::{Deserialize, Serialize};

use crate::error::SellerError;
use crate::rest::endpoints::{DEFAULT_BASE_URL, DEFAULT_SELLER_CENTRAL_BASE_URL};
use crate::types::serde_helpers::{duration_millis, duration_secs};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry bounds for transient platform failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wait before the first retry; doubles on each following retry.
    #[serde(rename = "min_wait_ms", with = "duration_millis")]
    pub min_wait: Duration,
    /// Upper bound on the wait between attempts.
    #[serde(rename = "max_wait_ms", with = "duration_millis")]
    pub max_wait: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            min_wait: Duration::from_millis(500),
            max_wait: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Disable retries entirely.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SellerError> {
        if self.min_wait > self.max_wait {
            return Err(SellerError::Config(format!(
                "retry min_wait ({:?}) exceeds max_wait ({:?})",
                self.min_wait, self.max_wait
            )));
        }
        Ok(())
    }

    /// The backoff policy for one logical request.
    pub(crate) fn policy(&self) -> ExponentialBackoff {
        ExponentialBackoff::builder()
            .retry_bounds(self.min_wait, self.max_wait)
            .jitter(Jitter::None)
            .build_with_max_retries(self.max_retries)
    }
}

/// Transport and platform settings for [`SellerClient`](crate::rest::SellerClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the marketplace/login sub-system.
    pub base_url: String,
    /// Base URL of the seller console sub-system.
    pub seller_central_base_url: String,
    /// Whole-request timeout, also applied to connecting.
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Duration,
    /// Log request and response bodies at debug level.
    pub debug: bool,
    /// Verify TLS certificates.
    pub verify_ssl: bool,
    /// Proxy for all traffic, e.g. `http://127.0.0.1:8888`.
    pub proxy: Option<String>,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Retry bounds.
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            seller_central_base_url: DEFAULT_SELLER_CENTRAL_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            verify_ssl: true,
            proxy: None,
            user_agent: format!("temu-seller-client/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from defaults overridden by environment variables.
    ///
    /// Reads `TEMU_BASE_URL`, `TEMU_SELLER_CENTRAL_BASE_URL`,
    /// `TEMU_TIMEOUT_SECS`, `TEMU_DEBUG`, `TEMU_VERIFY_SSL`, `TEMU_PROXY` and
    /// `TEMU_USER_AGENT`. Unset or empty variables keep the default.
    pub fn from_env() -> Result<Self, SellerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, SellerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("TEMU_BASE_URL") {
            config.base_url = url;
        }
        if let Some(url) = get("TEMU_SELLER_CENTRAL_BASE_URL") {
            config.seller_central_base_url = url;
        }
        if let Some(secs) = get("TEMU_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                SellerError::Config(format!("TEMU_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = get("TEMU_DEBUG") {
            config.debug = parse_flag("TEMU_DEBUG", &flag)?;
        }
        if let Some(flag) = get("TEMU_VERIFY_SSL") {
            config.verify_ssl = parse_flag("TEMU_VERIFY_SSL", &flag)?;
        }
        config.proxy = get("TEMU_PROXY");
        if let Some(agent) = get("TEMU_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SellerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SellerError::Config(format!(
            "{key} is not a boolean: {other}"
        ))),
    }
}
