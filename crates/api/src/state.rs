use std::sync::Arc;

use advisor_events::EventBus;
use advisor_store::SharedStore;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Process data store (readings, alerts, recommendation records).
    pub store: SharedStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing process events.
    pub event_bus: Arc<EventBus>,
}
