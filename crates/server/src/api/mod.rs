pub mod health;
pub mod schemas;

use std::any::Any;

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use relay_core::WebhookBinding;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::binder::{BindReport, RouteBinder};
use crate::error::ServerError;

/// Path of the liveness probe. Bindings may not claim it.
pub const HEALTH_PATH: &str = "/health";

/// Build the full router: health probe, one POST route per valid binding,
/// request tracing and panic containment.
pub fn router(binder: &RouteBinder, bindings: &[WebhookBinding]) -> (Router, BindReport) {
    let base = Router::new().route(HEALTH_PATH, get(health::health));
    let (router, report) = binder.bind(base, bindings);

    let router = router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http());
    (router, report)
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    ServerError::Internal("handler panicked".to_owned()).into_response()
}
