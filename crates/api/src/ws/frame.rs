//! Outbound WebSocket frame shapes.

use axum::extract::ws::Message;
use serde::Serialize;

use advisor_events::ProcessEvent;
use advisor_sim::MetricsSnapshot;

use crate::ws::manager::WsSender;

/// Every frame the server sends, tagged by `type`.
///
/// Snapshot and event frames flatten their payload next to the tag, so a
/// snapshot arrives as `{"type":"snapshot","feed":...,"seq":...,...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame<'a> {
    /// Acknowledges a subscribe request.
    Subscribed { feed: &'a str },
    /// Acknowledges an unsubscribe request.
    Unsubscribed { feed: &'a str },
    /// One simulation tick for a subscribed feed.
    Snapshot(&'a MetricsSnapshot),
    /// A domain event forwarded from the bus.
    Event(&'a ProcessEvent),
    /// A rejected or malformed client request.
    Error { message: String },
}

/// Encode and queue a frame on a connection's channel.
///
/// Returns `false` when the connection channel is closed. An encoding
/// failure is logged and counts as delivered.
pub(crate) fn send_frame(sender: &WsSender, frame: &ServerFrame<'_>) -> bool {
    match serde_json::to_string(frame) {
        Ok(text) => sender.send(Message::Text(text.into())).is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode WebSocket frame");
            true
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use advisor_events::{ProcessEvent, ALERT_CREATED};

    use super::*;

    #[test]
    fn snapshot_frame_flattens_next_to_the_tag() {
        let snapshot = MetricsSnapshot {
            feed: "furnace".to_string(),
            seq: 7,
            captured_at: Utc::now(),
            metrics: Vec::new(),
        };

        let value = serde_json::to_value(ServerFrame::Snapshot(&snapshot)).unwrap();
        assert_eq!(value["type"], "snapshot");
        assert_eq!(value["feed"], "furnace");
        assert_eq!(value["seq"], 7);
        assert!(value["metrics"].as_array().unwrap().is_empty());
    }

    #[test]
    fn event_frame_carries_the_event_fields() {
        let event = ProcessEvent::new(ALERT_CREATED).with_source("FURNACE_001");

        let value = serde_json::to_value(ServerFrame::Event(&event)).unwrap();
        assert_eq!(value["type"], "event");
        assert_eq!(value["event_type"], "alert.created");
        assert_eq!(value["source"], "FURNACE_001");
    }

    #[test]
    fn control_frames_use_snake_case_tags() {
        let value = serde_json::to_value(ServerFrame::Subscribed { feed: "quality" }).unwrap();
        assert_eq!(value["type"], "subscribed");
        assert_eq!(value["feed"], "quality");

        let value = serde_json::to_value(ServerFrame::Error {
            message: "Unknown feed 'x'".to_string(),
        })
        .unwrap();
        assert_eq!(value["type"], "error");
    }
}
