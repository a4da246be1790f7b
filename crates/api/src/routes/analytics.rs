//! Route definitions for analytics and the dashboard summary.
//!
//! Two routers are provided:
//! - `router()` for analysis routes mounted at `/analytics`
//! - `dashboard_router()` for the summary route mounted at `/dashboard`

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Analysis routes mounted at `/analytics`.
///
/// ```text
/// GET /quality  -> quality_analysis (?hours=&furnace_id=)
/// GET /system   -> system_analytics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quality", get(analytics::quality_analysis))
        .route("/system", get(analytics::system_analytics))
}

/// Dashboard summary routes mounted at `/dashboard`.
///
/// ```text
/// GET /metrics  -> dashboard_metrics
/// ```
pub fn dashboard_router() -> Router<AppState> {
    Router::new().route("/metrics", get(analytics::dashboard_metrics))
}
