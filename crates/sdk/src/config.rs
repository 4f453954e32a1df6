//! Client configuration and endpoint address

use crate::error::{Result, RulesError};
use reqwest::Url;
use ruleskit_core::OperationPath;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("ruleskit/", env!("CARGO_PKG_VERSION"));

/// Base location of the rule service, fixed for a client's lifetime
///
/// Always an absolute `http`/`https` URL whose path ends in `/`, so operation
/// paths are appended rather than replacing the last segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointAddress(Url);

impl EndpointAddress {
    pub fn parse(address: &str) -> Result<Self> {
        let mut url = Url::parse(address)
            .map_err(|e| RulesError::InvalidEndpoint(format!("{}: {}", address, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(RulesError::InvalidEndpoint(format!(
                "{}: scheme must be http or https",
                address
            )));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(RulesError::InvalidEndpoint(format!(
                "{}: missing host",
                address
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(RulesError::InvalidEndpoint(format!(
                "{}: query and fragment are not allowed",
                address
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self(url))
    }

    /// Full URL of one operation
    pub fn join(&self, path: &OperationPath) -> Result<Url> {
        self.0
            .join(path.as_str())
            .map_err(|e| RulesError::InvalidPath(format!("{}: {}", path, e)))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl std::fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// HTTP client configuration
///
/// No timeout is imposed unless one is set.
///
/// # Example
///
/// ```
/// use ruleskit_sdk::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("http://127.0.0.1:8000")
///     .with_timeout(Duration::from_secs(10))
///     .with_connect_timeout(Duration::from_secs(2));
/// assert_eq!(config.timeout, Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout (connect + send + response body)
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            connect_timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
