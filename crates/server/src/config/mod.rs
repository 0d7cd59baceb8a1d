mod delivery;
mod render;
mod server;
mod telemetry;
mod webhooks;


pub use delivery::*;
pub use render::*;
pub use server::*;
pub use telemetry::*;
pub use webhooks::*;

use std::collections::BTreeMap;
use std::path::Path;

use relay_core::WebhookBinding;
use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the relay, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct RelayConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound delivery configuration.
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Payload rendering configuration.
    #[serde(default)]
    pub render: RenderConfig,
    /// `OpenTelemetry` distributed tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Webhook bindings keyed by name, one `[webhook.<name>]` table each.
    #[serde(default)]
    pub webhook: BTreeMap<String, WebhookEntry>,
}

impl RelayConfig {
    /// Parse a configuration document.
    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse the configuration file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Build the bindings described by the `[webhook.*]` tables, in name order.
    ///
    /// Entries are returned as written; missing fields become empty strings
    /// and are rejected later by [`WebhookBinding::validate`].
    pub fn list_bindings(&self) -> Vec<WebhookBinding> {
        self.list_bindings_with(|var| std::env::var(var).ok())
    }

    /// Like [`list_bindings`](Self::list_bindings), resolving `url_env`
    /// through `lookup` instead of the process environment.
    pub fn list_bindings_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<WebhookBinding> {
        self.webhook
            .iter()
            .map(|(name, entry)| {
                WebhookBinding::new(
                    name.clone(),
                    entry.endpoint.clone().unwrap_or_default(),
                    entry.resolve_url(&lookup),
                )
                .with_format(entry.format)
            })
            .collect()
    }
}
