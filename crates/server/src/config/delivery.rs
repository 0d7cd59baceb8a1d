use serde::Deserialize;

/// Outbound delivery configuration shared by every binding.
///
/// # Example
///
/// ```toml
/// [delivery]
/// timeout_seconds = 10
/// dry_run = false
/// ```
#[derive(Debug, Deserialize)]
pub struct DeliveryConfig {
    /// Upper bound on one outbound request, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Log rendered payloads instead of posting them.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            dry_run: false,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    relay_slack::config::DEFAULT_TIMEOUT_SECS
}
