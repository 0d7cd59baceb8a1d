use thiserror::Error;

/// Reasons a configured binding is refused at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The inbound endpoint does not start with `/`.
    #[error("invalid endpoint {0:?} (must start with '/')")]
    InvalidEndpoint(String),

    /// The inbound endpoint contains characters the router treats as captures.
    #[error("invalid endpoint {0:?} (route pattern characters are not allowed)")]
    PatternEndpoint(String),

    /// The endpoint collides with a route the server owns.
    #[error("endpoint {0:?} is reserved")]
    ReservedEndpoint(String),

    /// Another binding already registered the same endpoint.
    #[error("endpoint {0:?} is already bound")]
    DuplicateEndpoint(String),

    /// No destination URL was configured.
    #[error("missing url")]
    MissingUrl,
}

/// Errors raised while parsing an inbound ticket event.
#[derive(Debug, Error)]
pub enum EventError {
    /// The body is not valid JSON, or a nested field has the wrong shape.
    #[error("invalid ticket event JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is valid JSON but not an object.
    #[error("ticket event must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
