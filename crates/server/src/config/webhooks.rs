use std::fmt;

use relay_core::{RenderFormat, redact_url};
use serde::Deserialize;

/// One `[webhook.<name>]` table.
///
/// # Example
///
/// ```toml
/// [webhook.support]
/// url = "https://hooks.slack.com/services/T000/B000/XXXX"
/// endpoint = "/support"
/// format = "blocks"
///
/// [webhook.ops]
/// url_env = "OPS_SLACK_WEBHOOK_URL"
/// endpoint = "/ops"
/// format = "text"
/// ```
#[derive(Default, Deserialize)]
pub struct WebhookEntry {
    /// Destination URL.
    pub url: Option<String>,
    /// Environment variable holding the destination URL, read when `url` is
    /// absent or empty. Keeps webhook tokens out of the config file.
    pub url_env: Option<String>,
    /// Inbound path, starting with `/`.
    pub endpoint: Option<String>,
    /// Rendering strategy: `"blocks"` (default) or `"text"`.
    #[serde(default)]
    pub format: RenderFormat,
}

impl WebhookEntry {
    /// Resolve the destination URL, consulting `url_env` when `url` is unset.
    ///
    /// Returns an empty string when neither source yields a value.
    pub fn resolve_url(&self, lookup: impl Fn(&str) -> Option<String>) -> String {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_owned(),
            _ => self
                .url_env
                .as_deref()
                .and_then(lookup)
                .map(|url| url.trim().to_owned())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Debug for WebhookEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookEntry")
            .field("url", &self.url.as_deref().map(redact_url))
            .field("url_env", &self.url_env)
            .field("endpoint", &self.endpoint)
            .field("format", &self.format)
            .finish()
    }
}
