use relay_provider::DeliveryError;
use thiserror::Error;

/// Errors specific to the Slack webhook client.
///
/// These are internal errors that get converted into [`DeliveryError`] at the
/// public API boundary.
#[derive(Debug, Error)]
pub enum SlackError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-2xx status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The payload could not be encoded as JSON.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The binding has no webhook URL.
    #[error("Slack webhook not configured")]
    MissingUrl,
}

impl From<SlackError> for DeliveryError {
    fn from(err: SlackError) -> Self {
        match err {
            SlackError::Http(e) => {
                if e.is_timeout() {
                    DeliveryError::Transport(format!("request timed out: {e}"))
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            }
            SlackError::UnexpectedStatus { status, .. } => DeliveryError::Rejected { status },
            SlackError::InvalidPayload(msg) => DeliveryError::Transport(msg),
            SlackError::MissingUrl => DeliveryError::ConfigurationMissing,
        }
    }
}
