use relay_core::EventError;
use thiserror::Error;

/// Errors raised while rendering an inbound body.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The body is not in the shape the renderer expects.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] EventError),
}
