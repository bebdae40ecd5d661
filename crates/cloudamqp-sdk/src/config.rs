// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the CloudAMQP SDK.

use std::time::Duration;

use crate::error::{Result, SdkError};

/// Default customer API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://customer.cloudamqp.com/api";

/// Configuration for the CloudAmqpClient.
#[derive(Clone)]
pub struct SdkConfig {
    /// Base URL of the customer API, without trailing slash.
    pub base_url: String,
    /// Account API key, sent as the basic-auth password.
    pub api_key: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("cloudamqp-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SdkConfig {
    /// Create a configuration for the given API key with default values.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLOUDAMQP_APIKEY`: API key (required)
    /// - `CLOUDAMQP_URL`: API base URL (default: "https://customer.cloudamqp.com/api")
    /// - `CLOUDAMQP_REQUEST_TIMEOUT_MS`: Request timeout in milliseconds (default: 30000)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("CLOUDAMQP_APIKEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SdkError::Config("CLOUDAMQP_APIKEY is not set".to_string()))?;

        let base_url =
            std::env::var("CLOUDAMQP_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let request_timeout_ms: u64 = std::env::var("CLOUDAMQP_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .map_err(|e| {
                SdkError::Config(format!("invalid CLOUDAMQP_REQUEST_TIMEOUT_MS: {}", e))
            })?;

        Ok(Self::new(api_key.trim())
            .with_base_url(base_url)
            .with_request_timeout(Duration::from_millis(request_timeout_ms)))
    }

    /// Set the API base URL. A trailing slash is removed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check that the configuration can be used to build a client.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SdkError::Config("API key is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SdkError::Config(format!(
                "base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SdkConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_empty());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("cloudamqp-cli/"));
    }

    #[test]
    fn test_builder_methods() {
        let config = SdkConfig::new("key-1")
            .with_base_url("http://127.0.0.1:9000/api/")
            .with_request_timeout(Duration::from_secs(5))
            .with_user_agent("tests");

        assert_eq!(config.api_key, "key-1");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "tests");
    }

    #[test]
    fn test_validate() {
        assert!(SdkConfig::new("key").validate().is_ok());
        assert!(matches!(
            SdkConfig::new("  ").validate(),
            Err(SdkError::Config(_))
        ));
        assert!(matches!(
            SdkConfig::new("key").with_base_url("ftp://nope").validate(),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let debug = format!("{:?}", SdkConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
