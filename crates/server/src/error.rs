use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_provider::DeliveryError;
use relay_render::RenderError;
use thiserror::Error;

use crate::api::schemas::ErrorResponse;

/// Detail returned when a binding has no usable destination.
pub const DETAIL_NOT_CONFIGURED: &str = "Slack webhook not configured.";

/// Detail returned when the destination could not be reached or refused the message.
pub const DETAIL_DELIVERY_FAILED: &str = "Error sending to Slack";

/// Detail returned for every other failure.
pub const DETAIL_INTERNAL: &str = "Internal server error";

/// Errors that can occur when running the relay.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. reading the config file or binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The inbound body could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The rendered payload could not be delivered.
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// An unexpected failure inside the server itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// The generic message shown to inbound callers.
    ///
    /// Never includes the underlying cause, which may carry destination
    /// details or upstream response bodies.
    pub fn detail(&self) -> &'static str {
        match self {
            Self::Delivery(DeliveryError::ConfigurationMissing) => DETAIL_NOT_CONFIGURED,
            Self::Delivery(_) => DETAIL_DELIVERY_FAILED,
            Self::Config(_) | Self::Io(_) | Self::Render(_) | Self::Internal(_) => DETAIL_INTERNAL,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.detail().to_owned(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
