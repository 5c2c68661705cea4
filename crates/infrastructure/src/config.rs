//! Client configuration.

use std::time::Duration;

use url::Url;

/// Backend used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while building a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The backend URL does not parse.
    #[error("invalid backend URL `{url}`: {source}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },

    /// The backend URL cannot have path segments appended (e.g. `mailto:`).
    #[error("backend URL `{0}` must be an http(s) URL")]
    UnsupportedScheme(String),
}

/// Connection settings for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL; endpoint paths are appended to it.
    pub backend_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header sent with every call.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration for `backend_url` with default timeout and
    /// user agent.
    ///
    /// # Errors
    ///
    /// Returns an error unless `backend_url` is an absolute http(s) URL.
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(backend_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            url: backend_url.to_string(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedScheme(backend_url.to_string()));
        }

        Ok(Self {
            backend_url: url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        })
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_user_agent() -> String {
    format!("Courier/{}", env!("CARGO_PKG_VERSION"))
}
