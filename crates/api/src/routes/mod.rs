pub mod alerts;
pub mod analytics;
pub mod feeds;
pub mod health;
pub mod readings;
pub mod recommendations;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /readings/recent               recent readings (GET ?hours=)
/// /readings/by-furnace           readings for one furnace (GET ?furnace_id=)
/// /readings                      record reading (POST)
///
/// /alerts/active                 unresolved alerts (GET)
/// /alerts                        raise alert (POST)
/// /alerts/{id}/resolve           resolve alert (POST)
///
/// /recommendations               recent recommendation records (GET ?limit=)
/// /recommendations/generate      build + store adjustment plan (POST)
/// /recommendations/additions     material addition suggestions (POST)
///
/// /evaluate                      classify metric readings (POST)
///
/// /analytics/quality             quality analysis (GET ?hours=&furnace_id=)
/// /analytics/system              system-wide analytics (GET)
/// /dashboard/metrics             dashboard summary (GET)
///
/// /feeds                         live feed descriptors (GET)
/// /feeds/{feed}/snapshot         one-shot evaluated snapshot (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Process reading history and ingestion.
        .nest("/readings", readings::router())
        // Alert lifecycle.
        .nest("/alerts", alerts::router())
        // Composition adjustment plans and material additions.
        .nest("/recommendations", recommendations::router())
        // Stateless tolerance classification.
        .route("/evaluate", post(handlers::evaluation::evaluate_readings))
        // Statistical analysis over recent history.
        .nest("/analytics", analytics::router())
        // Aggregated dashboard summary.
        .nest("/dashboard", analytics::dashboard_router())
        // Live feed catalog and snapshots.
        .nest("/feeds", feeds::router())
}
