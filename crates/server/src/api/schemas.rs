use serde::{Deserialize, Serialize};

/// Body returned by `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"online"` while the process serves requests.
    pub status: String,
}

/// Body returned when a notification was rendered and delivered.
#[derive(Debug, Serialize, Deserialize)]
pub struct DescriptionResponse {
    /// Visible text extracted from the inbound event.
    pub description_text: String,
}

/// Body returned for every failed webhook request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Generic, caller-safe failure message.
    pub detail: String,
}
