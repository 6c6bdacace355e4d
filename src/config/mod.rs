//! Configuration management for the MailChannels client.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables
//! - Builder pattern

use http::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::errors::ConfigurationError;

/// Secure wrapper for the MailChannels API key
#[derive(Clone)]
pub struct ApiKey {
    key: SecretString,
}

impl ApiKey {
    /// Create a new API key. Empty keys are rejected.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey);
        }
        if HeaderValue::from_str(&key).is_err() {
            return Err(ConfigurationError::InvalidApiKey);
        }
        Ok(Self {
            key: SecretString::new(key),
        })
    }

    /// Expose the key for use in request headers
    pub(crate) fn expose(&self) -> &str {
        self.key.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

/// Configuration for the MailChannels client
#[derive(Clone)]
pub struct MailChannelsConfig {
    /// API key sent as `X-API-Key` on every request
    pub(crate) api_key: ApiKey,
    /// Base URL for API requests
    pub base_url: Url,
    /// Request timeout applied by the default transport
    pub timeout: Duration,
    /// Fixed content-negotiation headers attached to every request
    pub default_headers: HeaderMap,
}

impl std::fmt::Debug for MailChannelsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailChannelsConfig")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MailChannelsConfig {
    /// Create a configuration with the default base URL
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new configuration builder
    pub fn builder() -> MailChannelsConfigBuilder {
        MailChannelsConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `MAILCHANNELS_API_KEY` - the API key (required)
    /// - `MAILCHANNELS_BASE_URL` - base URL override (optional)
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let key = std::env::var("MAILCHANNELS_API_KEY")
            .map_err(|_| ConfigurationError::EnvVar("MAILCHANNELS_API_KEY is not set".into()))?;

        let mut builder = Self::builder().api_key(key);
        if let Ok(base_url) = std::env::var("MAILCHANNELS_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }
}

/// Builder for [`MailChannelsConfig`]
#[derive(Default)]
pub struct MailChannelsConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    headers: HeaderMap,
}

impl MailChannelsConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the base URL (useful for testing against a local server)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout used by the default transport
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a default header sent on every request
    pub fn header(mut self, name: http::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MailChannelsConfig, ConfigurationError> {
        let api_key = ApiKey::new(self.api_key.unwrap_or_default())?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string());
        let base_url =
            Url::parse(&base_url).map_err(|e| ConfigurationError::InvalidBaseUrl(e.to_string()))?;

        let mut default_headers = self.headers;
        if !default_headers.contains_key(ACCEPT) {
            default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        if !default_headers.contains_key(CONTENT_TYPE) {
            default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(MailChannelsConfig {
            api_key,
            base_url,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS)),
            default_headers,
        })
    }
}
