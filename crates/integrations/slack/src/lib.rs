//! Slack incoming-webhook delivery for the notification relay.
//!
//! [`SlackWebhookClient`] implements [`Delivery`](relay_provider::Delivery):
//! it POSTs a rendered payload as JSON to the destination URL of a binding
//! and maps every failure onto [`DeliveryError`](relay_provider::DeliveryError).
//!
//! ```rust,no_run
//! use relay_slack::{SlackConfig, SlackWebhookClient};
//!
//! let client = SlackWebhookClient::new(SlackConfig::new().with_timeout_secs(5))
//!     .expect("HTTP client should build");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::SlackWebhookClient;
pub use config::SlackConfig;
pub use error::SlackError;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
