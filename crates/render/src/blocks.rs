use relay_core::{Block, EventKind, Rendered, RenderedPayload, TicketEvent};

use crate::Renderer;
use crate::error::RenderError;
use crate::html::strip_html;
use crate::labels::{priority_label, status_label};

/// Ticket link prefix used when none is configured; the ticket id is appended.
pub const DEFAULT_TICKET_BASE_URL: &str = "http://localhost/glpi/front/ticket.form.php?id=";

/// Maximum description length, in characters, after markup is stripped.
pub const MAX_DESCRIPTION_CHARS: usize = 700;

/// Shown when a ticket has no visible description.
pub const EMPTY_DESCRIPTION: &str = "No description provided.";

/// Shown when a ticket has no title.
pub const UNTITLED: &str = "Untitled ticket";

/// Maximum title length, in characters, after markup is stripped.
pub const MAX_TITLE_CHARS: usize = 250;

/// Slack rejects section blocks whose text is longer than this.
pub const MAX_SECTION_CHARS: usize = 3000;

const ELLIPSIS: &str = "...";

/// Renders GLPI JSON ticket events as Slack Block Kit messages.
///
/// The message is, in order: a context line with status and priority, a
/// header naming the event, a link to the ticket, the title with a cleaned
/// description, and a divider.
#[derive(Debug, Clone)]
pub struct BlockRenderer {
    ticket_base_url: String,
}

impl BlockRenderer {
    pub fn new(ticket_base_url: impl Into<String>) -> Self {
        Self {
            ticket_base_url: ticket_base_url.into(),
        }
    }
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TICKET_BASE_URL)
    }
}

impl Renderer for BlockRenderer {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "blocks"
    }

    fn render(&self, body: &str) -> Result<Rendered, RenderError> {
        let event = TicketEvent::from_json(body)?;
        let item = &event.item;

        let heading = match event.kind() {
            EventKind::New => "New ticket",
            EventKind::Update => "Ticket updated",
        };
        let status = status_label(item.status.name.as_deref());
        let priority = priority_label(item.priority);
        let title = item
            .name
            .as_deref()
            .map(strip_html)
            .filter(|title| !title.is_empty())
            .map_or_else(
                || UNTITLED.to_owned(),
                |title| truncate_chars(&title, MAX_TITLE_CHARS),
            );
        let description = clean_description(item.content.as_deref());

        let blocks = vec![
            Block::context(format!("*Status:* {status}  |  *Priority:* {priority}")),
            Block::header(heading),
            Block::section(format!(
                "<{}{}|#{}>",
                self.ticket_base_url, item.id, item.id
            )),
            Block::section(summary_section(&title, &description)),
            Block::divider(),
        ];
        let fallback = format!("{heading} #{}: {title}", item.id);

        Ok(Rendered {
            payload: RenderedPayload::blocks(fallback, blocks),
            description,
        })
    }
}

/// Turn a ticket's HTML content into the description shown in the message.
///
/// Markup is stripped first, so the length limit applies to visible text.
pub fn clean_description(content: Option<&str>) -> String {
    let text = strip_html(content.unwrap_or_default());
    if text.is_empty() {
        return EMPTY_DESCRIPTION.to_owned();
    }
    truncate_chars(&text, MAX_DESCRIPTION_CHARS)
}

/// Cut `text` to at most `max` characters, appending `...` when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}{ELLIPSIS}", &text[..idx]),
        None => text.to_owned(),
    }
}

/// Build `*{title}*\n{description}` with both parts escaped for `mrkdwn`,
/// cutting the description so the whole text fits in one section block.
fn summary_section(title: &str, description: &str) -> String {
    let mut text = format!("*{}*\n", escape_mrkdwn(title));
    let budget = MAX_SECTION_CHARS.saturating_sub(text.chars().count());
    text.push_str(&escape_mrkdwn_within(description, budget));
    text
}

/// Escape the characters Slack's `mrkdwn` treats as control sequences.
fn escape_mrkdwn(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape `text` into at most `max` characters.
///
/// When the escaped form is too long it is cut between source characters,
/// never inside an entity, and `...` is appended within the limit.
fn escape_mrkdwn_within(text: &str, max: usize) -> String {
    let escaped = escape_mrkdwn(text);
    if escaped.chars().count() <= max {
        return escaped;
    }

    let limit = max.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let piece = match ch {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            _ => "",
        };
        let width = if piece.is_empty() { 1 } else { piece.len() };
        if used + width > limit {
            break;
        }
        if piece.is_empty() {
            out.push(ch);
        } else {
            out.push_str(piece);
        }
        used += width;
    }
    if max >= ELLIPSIS.len() {
        out.push_str(ELLIPSIS);
    }
    out
}
