use std::sync::LazyLock;

use regex::Regex;
use relay_core::{Rendered, RenderedPayload};

use crate::Renderer;
use crate::error::RenderError;
use crate::html::strip_html;

/// Matches GLPI ticket references such as `Ticket #482`.
static TICKET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Ticket #([0-9]+)").expect("ticket id regex is valid"));

/// Text sent when a body has no visible text at all.
const EMPTY_BODY_TEXT: &str = "(empty notification)";

/// Find the first `Ticket #<digits>` reference in a raw body.
pub fn extract_ticket_id(raw: &str) -> Option<&str> {
    TICKET_ID_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Renders any body as flat text.
///
/// The whole body is treated as HTML; its visible text becomes the message,
/// prefixed with `Ticket ID: <id>` when a ticket reference is found.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl Renderer for PlainTextRenderer {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "text"
    }

    fn render(&self, body: &str) -> Result<Rendered, RenderError> {
        let description = strip_html(body);

        let text = match (extract_ticket_id(body), description.is_empty()) {
            (Some(id), true) => format!("Ticket ID: {id}"),
            (Some(id), false) => format!("Ticket ID: {id}\n{description}"),
            (None, true) => EMPTY_BODY_TEXT.to_owned(),
            (None, false) => description.clone(),
        };

        Ok(Rendered {
            payload: RenderedPayload::text(text),
            description,
        })
    }
}
