//! Core types for the GLPI to Slack notification relay.
//!
//! This crate holds the data model shared by the renderer, the delivery
//! clients and the HTTP server: configured [`WebhookBinding`]s, the tolerant
//! [`TicketEvent`] view of inbound GLPI payloads, and the outbound
//! [`RenderedPayload`] handed to a delivery client.

pub mod binding;
pub mod error;
pub mod payload;
pub mod ticket;

pub use binding::{RenderFormat, WebhookBinding, redact_url};
pub use error::{BindingError, EventError};
pub use payload::{Block, BlockKind, Rendered, RenderedPayload, TextKind, TextObject};
pub use ticket::{EventKind, TicketEvent, TicketItem, TicketStatus};
