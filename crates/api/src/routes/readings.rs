//! Route definitions for process readings.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::readings;
use crate::state::AppState;

/// Reading routes mounted at `/readings`.
///
/// ```text
/// GET  /recent       -> recent_readings (?hours=)
/// GET  /by-furnace   -> readings_by_furnace (?furnace_id=)
/// POST /             -> create_reading
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(readings::create_reading))
        .route("/recent", get(readings::recent_readings))
        .route("/by-furnace", get(readings::readings_by_furnace))
}
