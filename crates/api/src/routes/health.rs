use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness payload served at `/` and `/health`.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Package name, so probes can tell which service answered.
    pub service: &'static str,
    pub version: &'static str,
}

/// GET /health
///
/// Always "ok" while the process is serving: an unreachable upstream store
/// degrades reads to mock data instead of taking the service down.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness routes, mounted at the root beside the WebSocket upgrade.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
}
