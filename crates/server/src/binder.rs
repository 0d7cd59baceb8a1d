//! Startup registration of webhook bindings as POST routes.

use std::collections::HashSet;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use bytes::Bytes;
use relay_core::{BindingError, WebhookBinding};
use relay_provider::DynDelivery;
use relay_render::build_renderer;
use tracing::{info, warn};

use crate::api::HEALTH_PATH;
use crate::handler::WebhookHandler;

/// A binding that was not registered, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBinding {
    pub name: String,
    pub reason: BindingError,
}

/// Outcome of registering a set of bindings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BindReport {
    /// `(endpoint, route name)` of every registered binding, in order.
    pub registered: Vec<(String, String)>,
    pub skipped: Vec<SkippedBinding>,
}

/// Registers one POST route per valid binding.
///
/// Invalid bindings are logged and skipped; they never prevent the others
/// from being served. When two bindings claim the same endpoint the first
/// one in configuration order wins.
pub struct RouteBinder {
    delivery: Arc<dyn DynDelivery>,
    ticket_base_url: String,
}

impl RouteBinder {
    pub fn new(delivery: Arc<dyn DynDelivery>, ticket_base_url: impl Into<String>) -> Self {
        Self {
            delivery,
            ticket_base_url: ticket_base_url.into(),
        }
    }

    /// Add the routes for `bindings` to `router`.
    pub fn bind(&self, mut router: Router, bindings: &[WebhookBinding]) -> (Router, BindReport) {
        let mut report = BindReport::default();
        let mut claimed: HashSet<&str> = HashSet::new();

        for binding in bindings {
            if let Err(reason) = check_binding(binding, &claimed) {
                warn!(
                    webhook = %binding.name,
                    endpoint = %binding.endpoint,
                    error = %reason,
                    "skipping webhook binding"
                );
                report.skipped.push(SkippedBinding {
                    name: binding.name.clone(),
                    reason,
                });
                continue;
            }
            claimed.insert(binding.endpoint.as_str());

            let handler = WebhookHandler::new(
                binding,
                build_renderer(binding.format, &self.ticket_base_url),
                Arc::clone(&self.delivery),
            );
            let route_name = handler.route_name().to_owned();
            router = router.route(
                &binding.endpoint,
                post(move |body: Bytes| async move { handler.handle(body).await }),
            );

            info!(
                endpoint = %binding.endpoint,
                route = %route_name,
                format = %binding.format,
                "Registered POST {} -> {}",
                binding.endpoint,
                route_name
            );
            report.registered.push((binding.endpoint.clone(), route_name));
        }

        (router, report)
    }
}

/// Validate a binding and check it against the endpoints already claimed.
fn check_binding(binding: &WebhookBinding, claimed: &HashSet<&str>) -> Result<(), BindingError> {
    binding.validate()?;
    if binding.endpoint == HEALTH_PATH {
        return Err(BindingError::ReservedEndpoint(binding.endpoint.clone()));
    }
    if claimed.contains(binding.endpoint.as_str()) {
        return Err(BindingError::DuplicateEndpoint(binding.endpoint.clone()));
    }
    Ok(())
}
