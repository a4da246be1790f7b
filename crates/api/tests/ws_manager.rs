//! Unit tests for `WsManager`.
//!
//! These tests exercise the WebSocket connection manager directly, without
//! performing any HTTP upgrades. They verify add/remove semantics, broadcast
//! delivery, and graceful shutdown behaviour.

use axum::body::Bytes;
use axum::extract::ws::Message;

use advisor_api::ws::WsManager;

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add() increments the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_increments_connection_count() {
    let manager = WsManager::new();

    let (_tx, _rx) = manager.add("conn-1".to_string()).await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: remove() decrements the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_decrements_connection_count() {
    let manager = WsManager::new();

    let (_tx, _rx) = manager.add("conn-1".to_string()).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: remove() with unknown ID is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = WsManager::new();

    let (_tx, _rx) = manager.add("conn-1".to_string()).await;
    manager.remove("nonexistent").await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: broadcast() reaches every registered connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broadcast_reaches_every_connection() {
    let manager = WsManager::new();

    let (_tx1, mut rx1) = manager.add("conn-1".to_string()).await;
    let (_tx2, mut rx2) = manager.add("conn-2".to_string()).await;

    manager.broadcast(Message::Text("hello".into())).await;

    assert_eq!(rx1.recv().await.unwrap(), Message::Text("hello".into()));
    assert_eq!(rx2.recv().await.unwrap(), Message::Text("hello".into()));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close frames and clears the map
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let (_tx1, mut rx1) = manager.add("conn-1".to_string()).await;
    let (_tx2, mut rx2) = manager.add("conn-2".to_string()).await;

    manager.shutdown_all().await;

    assert_eq!(rx1.recv().await.unwrap(), Message::Close(None));
    assert_eq!(rx2.recv().await.unwrap(), Message::Close(None));
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: ping_all() sends a Ping to every connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_sends_a_ping_to_every_connection() {
    let manager = WsManager::new();

    let (_tx, mut rx) = manager.add("conn-1".to_string()).await;

    manager.ping_all().await;

    assert_eq!(rx.recv().await.unwrap(), Message::Ping(Bytes::new()));
}
