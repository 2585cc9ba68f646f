//! Public configuration for the remote analysis client.

use std::time::Duration;

/// Default origin of the analysis service.
pub const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8788";

/// Path of the analysis endpoint relative to the origin.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Configuration for the remote analysis client.
///
/// # Example
///
/// ```
/// use iodo_remote::RemoteClientConfig;
/// use std::time::Duration;
///
/// let config = RemoteClientConfig::new()
///     .with_origin("https://diagnostics.example.com")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct RemoteClientConfig {
    /// Origin the endpoint path is resolved against
    pub(crate) origin: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
}

impl Default for RemoteClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            user_agent: concat!("iodo-remote/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RemoteClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the origin of the analysis service.
    ///
    /// Defaults to `http://127.0.0.1:8788`.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}
