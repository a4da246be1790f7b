//! Route definitions for process alerts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// Alert routes mounted at `/alerts`.
///
/// ```text
/// GET  /active        -> active_alerts
/// POST /              -> create_alert
/// POST /{id}/resolve  -> resolve_alert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(alerts::create_alert))
        .route("/active", get(alerts::active_alerts))
        .route("/{id}/resolve", post(alerts::resolve_alert))
}
