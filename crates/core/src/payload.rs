use serde::{Deserialize, Serialize};

/// Type of a Block Kit text object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    PlainText,
    Mrkdwn,
}

/// A Block Kit text object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub text: String,
    /// Only meaningful for `plain_text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl TextObject {
    /// A `plain_text` object with emoji shortcodes enabled.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::PlainText,
            text: text.into(),
            emoji: Some(true),
        }
    }

    /// A `mrkdwn` object.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Mrkdwn,
            text: text.into(),
            emoji: None,
        }
    }
}

/// Discriminant of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Context,
    Header,
    Section,
    Divider,
}

/// One typed fragment of a structured chat message.
///
/// Serializes to the Slack Block Kit wire form, e.g.
/// `{"type": "section", "text": {"type": "mrkdwn", "text": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Context { elements: Vec<TextObject> },
    Header { text: TextObject },
    Section { text: TextObject },
    Divider,
}

impl Block {
    /// A context block holding a single markdown element.
    pub fn context(text: impl Into<String>) -> Self {
        Self::Context {
            elements: vec![TextObject::markdown(text)],
        }
    }

    /// A header block with plain text.
    pub fn header(text: impl Into<String>) -> Self {
        Self::Header {
            text: TextObject::plain(text),
        }
    }

    /// A section block with markdown text.
    pub fn section(text: impl Into<String>) -> Self {
        Self::Section {
            text: TextObject::markdown(text),
        }
    }

    pub fn divider() -> Self {
        Self::Divider
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Context { .. } => BlockKind::Context,
            Self::Header { .. } => BlockKind::Header,
            Self::Section { .. } => BlockKind::Section,
            Self::Divider => BlockKind::Divider,
        }
    }

    /// The text carried by the block, if any.
    ///
    /// Context blocks report their first element.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Context { elements } => elements.first().map(|e| e.text.as_str()),
            Self::Header { text } | Self::Section { text } => Some(&text.text),
            Self::Divider => None,
        }
    }
}

/// The outbound notification body handed to a delivery client.
///
/// Serialized untagged: a text payload becomes `{"text": "..."}` and a block
/// payload becomes `{"text": "<fallback>", "blocks": [...]}`, which is what
/// Slack incoming webhooks accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderedPayload {
    /// A flat text message.
    Text { text: String },
    /// A structured message; `text` is shown where blocks cannot be
    /// (push notifications, screen readers).
    Blocks { text: String, blocks: Vec<Block> },
}

impl RenderedPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn blocks(fallback: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self::Blocks {
            text: fallback.into(),
            blocks,
        }
    }

    /// The top-level text of the payload.
    pub fn fallback_text(&self) -> &str {
        match self {
            Self::Text { text } | Self::Blocks { text, .. } => text,
        }
    }

    /// The blocks of a structured payload; empty for text payloads.
    pub fn block_list(&self) -> &[Block] {
        match self {
            Self::Text { .. } => &[],
            Self::Blocks { blocks, .. } => blocks,
        }
    }
}

/// The result of rendering one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// What gets delivered.
    pub payload: RenderedPayload,
    /// Human-readable description extracted from the event, echoed back to
    /// the inbound caller on success.
    pub description: String,
}
