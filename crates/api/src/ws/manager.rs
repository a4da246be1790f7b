use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Outbound channel half for one dashboard socket.
///
/// Everything that wants to push a frame to a client (the subscription
/// tasks, the event forwarder, the heartbeat) goes through one of these;
/// the socket's own send loop drains the paired receiver.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Registry of live dashboard connections, keyed by connection id.
///
/// Shared as `Arc<WsManager>` between the upgrade handler, the event
/// forwarder, the heartbeat task, and shutdown.
pub struct WsManager {
    senders: RwLock<HashMap<String, WsSender>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            senders: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection and open its outbound channel.
    ///
    /// The returned sender is for the connection's own tasks (snapshot
    /// forwarding, acks); the receiver is drained by the socket send loop.
    /// The registry keeps a sender clone so broadcasts reach this client.
    pub async fn add(&self, conn_id: String) -> (WsSender, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.write().await.insert(conn_id, tx.clone());
        (tx, rx)
    }

    /// Drop a connection from the registry. Unknown ids are ignored.
    pub async fn remove(&self, conn_id: &str) {
        self.senders.write().await.remove(conn_id);
    }

    /// Push a message to every registered connection.
    ///
    /// A send into a closed channel means that client is mid-disconnect;
    /// its socket task removes the entry, so the error is dropped here.
    pub async fn broadcast(&self, message: Message) {
        for sender in self.senders.read().await.values() {
            let _ = sender.send(message.clone());
        }
    }

    /// Number of currently registered connections.
    pub async fn connection_count(&self) -> usize {
        self.senders.read().await.len()
    }

    /// Ask every client to close, then forget them all.
    ///
    /// Called once during graceful shutdown, after the listener has
    /// stopped accepting upgrades.
    pub async fn shutdown_all(&self) {
        let mut senders = self.senders.write().await;
        let count = senders.len();
        for (_, sender) in senders.drain() {
            let _ = sender.send(Message::Close(None));
        }
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Ping every client so proxies keep idle sockets open.
    pub async fn ping_all(&self) {
        for sender in self.senders.read().await.values() {
            let _ = sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
