use axum::Json;

use super::schemas::HealthResponse;

/// Status reported while the process is serving.
pub const ONLINE: &str = "online";

/// `GET /health` -- liveness probe.
///
/// Touches no binding or outbound destination, so it answers even when no
/// webhook is configured.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: ONLINE.to_owned(),
    })
}
