use relay_core::{RenderedPayload, redact_url};
use relay_provider::{Delivery, DeliveryError};
use tracing::{debug, info, instrument, warn};

use crate::config::SlackConfig;
use crate::error::SlackError;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Delivers rendered payloads to Slack incoming webhooks.
///
/// The destination URL is supplied per call, so one client (and one
/// connection pool) serves every binding. Each call makes a single attempt.
pub struct SlackWebhookClient<T = ReqwestTransport> {
    transport: T,
}

impl SlackWebhookClient<ReqwestTransport> {
    /// Create a client backed by `reqwest` with the configured timeout.
    pub fn new(config: SlackConfig) -> Result<Self, SlackError> {
        Ok(Self::with_transport(ReqwestTransport::new(&config)?))
    }
}

impl<T: HttpTransport> SlackWebhookClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    async fn post(&self, payload: &RenderedPayload, destination: &str) -> Result<(), SlackError> {
        if destination.trim().is_empty() {
            return Err(SlackError::MissingUrl);
        }

        let body =
            serde_json::to_vec(payload).map_err(|e| SlackError::InvalidPayload(e.to_string()))?;

        debug!(bytes = body.len(), "posting payload to Slack webhook");

        let response = self.transport.post_json(destination, body).await?;

        if response.is_success() {
            info!(status = response.status, "message sent to Slack");
            return Ok(());
        }

        warn!(status = response.status, "Slack webhook rejected payload");
        debug!(status = response.status, body = %response.body, "Slack rejection body");
        Err(SlackError::UnexpectedStatus {
            status: response.status,
            body: response.body,
        })
    }
}

impl<T: HttpTransport> Delivery for SlackWebhookClient<T> {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "slack"
    }

    #[instrument(
        skip(self, payload, destination),
        fields(delivery = "slack", destination = %redact_url(destination))
    )]
    async fn deliver(
        &self,
        payload: &RenderedPayload,
        destination: &str,
    ) -> Result<(), DeliveryError> {
        self.post(payload, destination).await.map_err(Into::into)
    }
}
