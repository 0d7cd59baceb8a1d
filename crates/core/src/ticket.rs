use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::EventError;

/// Whether a ticket event announces a new ticket or a change to one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventKind {
    New,
    #[default]
    Update,
}

impl EventKind {
    /// Interpret the `event` field of a GLPI notification.
    ///
    /// Only `"new"` (case-insensitive) marks a new ticket; every other value
    /// is treated as an update.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("new") {
            Self::New
        } else {
            Self::Update
        }
    }
}

/// Parsed view of a GLPI ticket notification.
///
/// Every field is optional. GLPI sends different shapes for creation and
/// update events, so missing or mistyped scalars fall back to defaults
/// instead of failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TicketEvent {
    /// Raw `event` field (`"new"` or `"update"`).
    #[serde(deserialize_with = "lenient_string")]
    pub event: Option<String>,
    /// The ticket the event is about.
    #[serde(deserialize_with = "null_as_default")]
    pub item: TicketItem,
}

/// The ticket carried by a [`TicketEvent`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TicketItem {
    /// Numeric ticket id; `0` when absent or unparseable.
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    /// Ticket title.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Ticket description, as HTML.
    #[serde(deserialize_with = "lenient_string")]
    pub content: Option<String>,
    /// GLPI priority, 1 (very low) to 6 (major); `0` when absent.
    #[serde(deserialize_with = "lenient_i64")]
    pub priority: i64,
    /// Current ticket status.
    #[serde(deserialize_with = "null_as_default")]
    pub status: TicketStatus,
}

/// Status of a ticket as reported by GLPI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TicketStatus {
    /// Display name, e.g. `"New"` or `"Solved"`.
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

impl TicketEvent {
    /// Parse a ticket event from an inbound body.
    ///
    /// The body must be a JSON object. Nested `item` and `status` values must
    /// be objects or `null` when present; scalar fields never fail.
    pub fn from_json(body: &str) -> Result<Self, EventError> {
        let value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(EventError::NotAnObject(json_type_name(&value)));
        }
        Ok(Self::deserialize(value)?)
    }

    /// The kind of event, defaulting to [`EventKind::Update`].
    pub fn kind(&self) -> EventKind {
        self.event
            .as_deref()
            .map_or(EventKind::Update, EventKind::parse)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
