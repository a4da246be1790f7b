//! Event bus to WebSocket fan-out.
//!
//! Every event published on the process bus (readings recorded, alerts
//! raised and resolved, recommendations generated) is pushed to every
//! connected client as an `{"type":"event", ...}` frame.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use advisor_events::ProcessEvent;

use crate::ws::frame::ServerFrame;
use crate::ws::manager::WsManager;

/// Forward every bus event to all connected WebSocket clients.
///
/// Runs until the bus sender is dropped. Spawned once at startup.
pub async fn forward_events(
    manager: Arc<WsManager>,
    mut events: broadcast::Receiver<ProcessEvent>,
) {
    loop {
        match events.recv().await {
            Ok(event) => match serde_json::to_string(&ServerFrame::Event(&event)) {
                Ok(text) => manager.broadcast(Message::Text(text.into())).await,
                Err(e) => tracing::error!(error = %e, "Failed to encode event frame"),
            },
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "Event forwarder lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                tracing::info!("Event bus closed, WebSocket forwarder shutting down");
                break;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
