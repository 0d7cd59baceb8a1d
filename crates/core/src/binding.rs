use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BindingError;

/// Prefix of the route identifier assigned to every bound webhook.
pub const ROUTE_PREFIX: &str = "webhook_";

/// Rendering strategy applied to the inbound bodies of a binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    /// Structured Block Kit message built from a JSON ticket event.
    #[default]
    Blocks,
    /// Markup-stripped plain text.
    Text,
}

impl RenderFormat {
    /// Returns the configuration name of this format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured pairing of one inbound path to one outbound destination.
///
/// Bindings are built once at startup and never mutated. The destination
/// usually embeds a secret token (Slack incoming webhook URLs do), so the
/// [`Debug`] implementation only shows its scheme and host.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookBinding {
    /// Unique binding name, taken from the `[webhook.<name>]` table key.
    pub name: String,
    /// Inbound path the relay accepts POST requests on.
    pub endpoint: String,
    /// Outbound destination URL.
    pub url: String,
    /// How inbound bodies are turned into outbound payloads.
    pub format: RenderFormat,
}

impl WebhookBinding {
    /// Create a binding with the default rendering format.
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            url: url.into(),
            format: RenderFormat::default(),
        }
    }

    /// Set the rendering format.
    #[must_use]
    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = format;
        self
    }

    /// Route identifier derived from the binding name, e.g. `webhook_support`.
    pub fn route_name(&self) -> String {
        format!("{ROUTE_PREFIX}{}", self.name)
    }

    /// Check the binding on its own, without regard to other bindings.
    pub fn validate(&self) -> Result<(), BindingError> {
        if !self.endpoint.starts_with('/') {
            return Err(BindingError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.endpoint.contains(['{', '}', '*'])
            || self.endpoint.split('/').any(|segment| segment.starts_with(':'))
        {
            return Err(BindingError::PatternEndpoint(self.endpoint.clone()));
        }
        if self.url.trim().is_empty() {
            return Err(BindingError::MissingUrl);
        }
        Ok(())
    }
}

impl fmt::Debug for WebhookBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookBinding")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("url", &redact_url(&self.url))
            .field("format", &self.format)
            .finish()
    }
}

/// Reduce a URL to its scheme and host so it can be logged.
///
/// Paths, queries and credentials are replaced by `[REDACTED]`. Inputs that
/// do not look like URLs are redacted entirely.
pub fn redact_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let Some((scheme, rest)) = url.split_once("://") else {
        return "[REDACTED]".to_owned();
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    if authority.len() == rest.len() && host.len() == authority.len() {
        format!("{scheme}://{host}")
    } else {
        format!("{scheme}://{host}/[REDACTED]")
    }
}
