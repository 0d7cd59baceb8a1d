//! Per-binding request handling: decode, render, deliver.

use std::sync::Arc;

use axum::Json;
use bytes::Bytes;
use relay_core::{WebhookBinding, redact_url};
use relay_provider::DynDelivery;
use relay_render::{Renderer, decode_body};
use tracing::{error, info, instrument};

use crate::api::schemas::DescriptionResponse;
use crate::error::ServerError;

/// Handles inbound requests for exactly one binding.
///
/// The destination is fixed when the route is registered, so every request
/// on a route is delivered to that binding's URL and no other.
#[derive(Clone)]
pub struct WebhookHandler {
    route_name: Arc<str>,
    destination: Arc<str>,
    renderer: Arc<dyn Renderer>,
    delivery: Arc<dyn DynDelivery>,
}

impl WebhookHandler {
    pub fn new(
        binding: &WebhookBinding,
        renderer: Arc<dyn Renderer>,
        delivery: Arc<dyn DynDelivery>,
    ) -> Self {
        Self {
            route_name: binding.route_name().into(),
            destination: binding.url.as_str().into(),
            renderer,
            delivery,
        }
    }

    /// Route identifier, e.g. `webhook_support`.
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// Render one inbound body and deliver it to this binding's destination.
    ///
    /// Makes a single delivery attempt. Failure details are logged here and
    /// reduced to a generic message by [`ServerError`]'s response.
    #[instrument(
        name = "webhook",
        skip(self, body),
        fields(route = %self.route_name, renderer = self.renderer.name(), bytes = body.len())
    )]
    pub async fn handle(&self, body: Bytes) -> Result<Json<DescriptionResponse>, ServerError> {
        info!("notification received");
        let text = decode_body(&body);

        let rendered = self.renderer.render(&text).map_err(|e| {
            error!(error = %e, "failed to render notification");
            ServerError::from(e)
        })?;

        self.delivery
            .deliver(&rendered.payload, &self.destination)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    reason = e.reason(),
                    delivery = self.delivery.name(),
                    destination = %redact_url(&self.destination),
                    "failed to deliver notification"
                );
                ServerError::from(e)
            })?;

        info!(delivery = self.delivery.name(), "notification relayed");
        Ok(Json(DescriptionResponse {
            description_text: rendered.description,
        }))
    }
}
