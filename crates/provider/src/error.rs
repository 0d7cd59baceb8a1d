use thiserror::Error;

/// Normalized outcome of a failed delivery.
///
/// Every delivery client maps its transport-specific failures onto these
/// variants, so callers never inspect the underlying HTTP library's errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// No destination was configured for the route.
    #[error("destination not configured")]
    ConfigurationMissing,

    /// The request never produced a response (timeout, refused connection,
    /// DNS failure, broken body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The destination answered with a non-success status.
    #[error("destination rejected delivery with HTTP {status}")]
    Rejected {
        /// HTTP status code returned by the destination.
        status: u16,
    },
}

impl DeliveryError {
    /// Short machine-readable reason, used as a log field.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "configuration_missing",
            Self::Transport(_) => "transport_error",
            Self::Rejected { .. } => "destination_rejected",
        }
    }
}
