//! Route definitions for alloy recommendations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

/// Recommendation routes mounted at `/recommendations`.
///
/// ```text
/// GET  /            -> recent_recommendations (?limit=)
/// POST /generate    -> generate_recommendation
/// POST /additions   -> material_additions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recommendations::recent_recommendations))
        .route("/generate", post(recommendations::generate_recommendation))
        .route("/additions", post(recommendations::material_additions))
}
