use relay_core::{RenderedPayload, redact_url};
use tracing::info;

use crate::delivery::Delivery;
use crate::error::DeliveryError;

/// A delivery channel that logs the payload instead of sending it.
///
/// Used for dry runs, where routes should be exercised end to end without
/// posting to the real chat workspace.
#[derive(Debug, Clone)]
pub struct LogDelivery {
    name: String,
}

impl LogDelivery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for LogDelivery {
    fn default() -> Self {
        Self::new("log")
    }
}

impl Delivery for LogDelivery {
    fn name(&self) -> &str {
        &self.name
    }

    #[allow(clippy::unused_async)]
    async fn deliver(
        &self,
        payload: &RenderedPayload,
        destination: &str,
    ) -> Result<(), DeliveryError> {
        if destination.is_empty() {
            return Err(DeliveryError::ConfigurationMissing);
        }
        info!(
            delivery = %self.name,
            destination = %redact_url(destination),
            blocks = payload.block_list().len(),
            text = %payload.fallback_text(),
            "log delivery accepted payload"
        );
        Ok(())
    }
}
