//! Publish/subscribe hub for plant events.
//!
//! One [`EventBus`] is shared as `Arc<EventBus>` by everything that raises
//! or observes [`ProcessEvent`]s. Handlers publish after a write succeeds
//! (or is locally acknowledged); the API layer subscribes once and fans
//! events out to connected WebSocket clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

/// A process reading was recorded.
pub const READING_RECORDED: &str = "reading.recorded";

/// A new alert was raised.
pub const ALERT_CREATED: &str = "alert.created";

/// An alert was marked resolved.
pub const ALERT_RESOLVED: &str = "alert.resolved";

/// A composition recommendation was generated.
pub const RECOMMENDATION_GENERATED: &str = "recommendation.generated";

// ---------------------------------------------------------------------------
// ProcessEvent
// ---------------------------------------------------------------------------

/// Something that happened in the plant, as seen by subscribers.
///
/// Build one with [`ProcessEvent::new`] plus the
/// [`with_source`](ProcessEvent::with_source) /
/// [`with_payload`](ProcessEvent::with_payload) builders. The type name
/// constants above are the full set the API publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEvent {
    /// One of the event name constants, e.g. [`ALERT_CREATED`].
    pub event_type: String,

    /// Where it happened, usually a furnace id.
    pub source: Option<String>,

    /// Event-specific JSON body, typically the affected record.
    pub payload: serde_json::Value,

    /// UTC creation time.
    pub timestamp: DateTime<Utc>,
}

impl ProcessEvent {
    /// An event of the given type with no source and an empty payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the originating furnace or system.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Replace the payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Channel capacity when none is configured.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus over a [`broadcast`] channel.
///
/// Every subscriber sees every event published after it subscribed;
/// subscribers never block publishers.
///
/// # Usage
///
/// ```rust
/// use advisor_events::bus::{EventBus, ProcessEvent, ALERT_CREATED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ProcessEvent::new(ALERT_CREATED).with_source("FURNACE_001"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ProcessEvent>,
}

impl EventBus {
    /// A bus whose channel buffers up to `capacity` events.
    ///
    /// A subscriber that falls more than `capacity` events behind loses
    /// the oldest ones and sees `RecvError::Lagged` on its next receive.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Hand an event to every current subscriber.
    pub fn publish(&self, event: ProcessEvent) {
        // A SendError only means there are zero receivers right now.
        let _ = self.sender.send(event);
    }

    /// Open a new receive handle on the bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ProcessEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
