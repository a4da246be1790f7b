//! Route definitions for live metric feeds.

use axum::routing::get;
use axum::Router;

use crate::handlers::feeds;
use crate::state::AppState;

/// Feed routes mounted at `/feeds`.
///
/// ```text
/// GET /                  -> list_feeds
/// GET /{feed}/snapshot   -> feed_snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(feeds::list_feeds))
        .route("/{feed}/snapshot", get(feeds::feed_snapshot))
}
