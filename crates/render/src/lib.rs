//! Payload renderers for the GLPI to Slack notification relay.
//!
//! Two strategies turn a raw inbound body into a [`Rendered`] payload:
//!
//! - [`BlockRenderer`] parses a GLPI JSON ticket event and builds a Block Kit
//!   message (context, header, link, description, divider).
//! - [`PlainTextRenderer`] treats the body as HTML and sends its visible text.
//!
//! Which one a route uses is chosen per binding through [`RenderFormat`].
//!
//! ```
//! use relay_core::RenderFormat;
//! use relay_render::{build_renderer, DEFAULT_TICKET_BASE_URL};
//!
//! let renderer = build_renderer(RenderFormat::Text, DEFAULT_TICKET_BASE_URL);
//! let rendered = renderer.render("<p>Ticket #12 closed</p>").unwrap();
//! assert_eq!(rendered.description, "Ticket #12 closed");
//! ```

pub mod blocks;
pub mod error;
pub mod html;
pub mod labels;
pub mod plain;

use std::borrow::Cow;
use std::sync::Arc;

use relay_core::{RenderFormat, Rendered};

pub use blocks::{
    BlockRenderer, DEFAULT_TICKET_BASE_URL, EMPTY_DESCRIPTION, MAX_DESCRIPTION_CHARS,
    MAX_SECTION_CHARS, MAX_TITLE_CHARS,
};
pub use error::RenderError;
pub use html::strip_html;
pub use plain::{PlainTextRenderer, extract_ticket_id};

/// A strategy converting an inbound body into an outbound payload.
///
/// Renderers are pure and shared across concurrent requests.
pub trait Renderer: Send + Sync {
    /// Configuration name of the strategy.
    fn name(&self) -> &str;

    /// Render one inbound body.
    fn render(&self, body: &str) -> Result<Rendered, RenderError>;
}

/// Build the renderer for a binding's format.
pub fn build_renderer(format: RenderFormat, ticket_base_url: &str) -> Arc<dyn Renderer> {
    match format {
        RenderFormat::Blocks => Arc::new(BlockRenderer::new(ticket_base_url)),
        RenderFormat::Text => Arc::new(PlainTextRenderer),
    }
}

/// Decode a request body as UTF-8, replacing invalid sequences.
pub fn decode_body(body: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(body)
}
