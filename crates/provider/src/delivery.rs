use async_trait::async_trait;
use relay_core::RenderedPayload;

use crate::error::DeliveryError;

/// Strongly-typed delivery trait with native `async fn`.
///
/// This trait is **not** object-safe. Route handlers hold delivery clients
/// behind `Arc<dyn DynDelivery>`; every `Delivery` implements [`DynDelivery`]
/// through a blanket implementation.
///
/// Implementations make exactly one attempt per call and must fail with
/// [`DeliveryError::ConfigurationMissing`] before any I/O when `destination`
/// is empty.
pub trait Delivery: Send + Sync {
    /// Returns the name of this delivery channel.
    fn name(&self) -> &str;

    /// Send `payload` to `destination`.
    fn deliver(
        &self,
        payload: &RenderedPayload,
        destination: &str,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}

/// Object-safe delivery trait for use behind `Arc<dyn DynDelivery>`.
///
/// Implement [`Delivery`] instead and rely on the blanket implementation.
#[async_trait]
pub trait DynDelivery: Send + Sync {
    /// Returns the name of this delivery channel.
    fn name(&self) -> &str;

    /// Send `payload` to `destination`.
    async fn deliver(
        &self,
        payload: &RenderedPayload,
        destination: &str,
    ) -> Result<(), DeliveryError>;
}

#[async_trait]
impl<T: Delivery + Sync> DynDelivery for T {
    fn name(&self) -> &str {
        Delivery::name(self)
    }

    async fn deliver(
        &self,
        payload: &RenderedPayload,
        destination: &str,
    ) -> Result<(), DeliveryError> {
        Delivery::deliver(self, payload, destination).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Fails with a fixed status for every non-empty destination.
    struct RejectingDelivery {
        status: u16,
        calls: AtomicUsize,
    }

    impl Delivery for RejectingDelivery {
        #[allow(clippy::unnecessary_literal_bound)]
        fn name(&self) -> &str {
            "rejecting"
        }

        async fn deliver(
            &self,
            _payload: &RenderedPayload,
            destination: &str,
        ) -> Result<(), DeliveryError> {
            if destination.is_empty() {
                return Err(DeliveryError::ConfigurationMissing);
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DeliveryError::Rejected {
                status: self.status,
            })
        }
    }

    #[tokio::test]
    async fn blanket_dyn_delivery_impl() {
        let inner = Arc::new(RejectingDelivery {
            status: 503,
            calls: AtomicUsize::new(0),
        });
        let delivery: Arc<dyn DynDelivery> = inner.clone();
        assert_eq!(delivery.name(), "rejecting");

        let payload = RenderedPayload::text("hi");
        let err = delivery
            .deliver(&payload, "http://localhost/hook")
            .await
            .unwrap_err();
        assert_eq!(err, DeliveryError::Rejected { status: 503 });
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);

        let err = delivery.deliver(&payload, "").await.unwrap_err();
        assert_eq!(err, DeliveryError::ConfigurationMissing);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}
