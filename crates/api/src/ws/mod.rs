//! WebSocket infrastructure for live metric streaming.
//!
//! Provides connection management, heartbeat monitoring, the event-bus
//! forwarder, and the HTTP upgrade handler used by Axum routes. Each
//! connection owns one [`advisor_sim::LiveSimulator`] per subscribed feed;
//! disconnecting drops them all, which stops their background loops.

mod events;
mod frame;
mod handler;
mod heartbeat;
pub mod manager;

pub use events::forward_events;
pub use frame::ServerFrame;
pub use handler::ws_handler;
pub use heartbeat::{start_heartbeat, HEARTBEAT_INTERVAL_SECS};
pub use manager::WsManager;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Mount the WebSocket route (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/ws", get(ws_handler))
}
