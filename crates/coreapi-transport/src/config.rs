//! HTTP transport configuration

use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default `User-Agent` header value
pub const DEFAULT_USER_AGENT: &str = concat!("coreapi-client/", env!("CARGO_PKG_VERSION"));

/// HTTP transport configuration
///
/// Loadable from TOML; every key is optional:
///
/// ```toml
/// timeout_secs = 30
/// user_agent = "my-app/1.0"
///
/// [headers]
/// X-Request-Source = "cli"
///
/// [credentials]
/// "api.example.org" = "Token abc123"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds, none by default
    pub timeout_secs: Option<u64>,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// `Authorization` header values keyed by host
    pub credentials: BTreeMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: BTreeMap::new(),
            credentials: BTreeMap::new(),
        }
    }
}

impl HttpConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidConfig`] for malformed TOML or
    /// mistyped keys.
    pub fn from_toml_str(source: &str) -> Result<Self, TransportError> {
        Ok(toml::from_str(source)?)
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// With user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// With an extra header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// With an `Authorization` value for requests to `host`
    #[must_use]
    pub fn with_credentials(mut self, host: impl Into<String>, value: impl Into<String>) -> Self {
        self.credentials.insert(host.into(), value.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// `Authorization` value for a host, matched case-insensitively
    #[must_use]
    pub fn authorization_for(&self, host: &str) -> Option<&str> {
        self.credentials
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(host))
            .map(|(_, value)| value.as_str())
    }
}
