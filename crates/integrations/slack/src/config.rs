use std::time::Duration;

/// Default timeout for one webhook request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the Slack webhook client.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Upper bound on one request, from connect until the response body has
    /// been read.
    pub timeout: Duration,

    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl SlackConfig {
    /// Create a configuration with the default timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("glpi-relay/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self::new()
    }
}
