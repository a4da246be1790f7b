use std::collections::HashMap;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;

use advisor_sim::seed::seeded_config;
use advisor_sim::{Feed, LiveSimulator, MetricsSnapshot};
use advisor_store::SharedStore;

use crate::state::AppState;
use crate::ws::frame::{send_frame, ServerFrame};
use crate::ws::manager::WsSender;

/// Inbound control frames.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    Subscribe { feed: String },
    Unsubscribe { feed: String },
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with `WsManager` and
/// managed by two tasks: a spawned sender and the inbound loop below.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes inbound subscribe/unsubscribe messages on the current task.
///   4. Cleans up on disconnect, dropping every subscribed simulator.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    let (sender, mut rx) = state.ws_manager.add(conn_id.clone()).await;
    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Feed subscriptions owned by this connection. Dropping a simulator
    // stops its loop, so disconnect tears everything down.
    let mut subscriptions: HashMap<Feed, LiveSimulator> = HashMap::new();

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                handle_client_message(
                    text.as_str(),
                    &conn_id,
                    &state.store,
                    &sender,
                    &mut subscriptions,
                )
                .await;
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Dispatch one inbound text frame.
async fn handle_client_message(
    text: &str,
    conn_id: &str,
    store: &SharedStore,
    sender: &WsSender,
    subscriptions: &mut HashMap<Feed, LiveSimulator>,
) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(m) => m,
        Err(e) => {
            send_frame(
                sender,
                &ServerFrame::Error {
                    message: format!("Malformed message: {e}"),
                },
            );
            return;
        }
    };

    match message {
        ClientMessage::Subscribe { feed } => {
            let Some(feed) = parse_feed(&feed, sender) else {
                return;
            };
            subscribe(feed, conn_id, store, sender, subscriptions).await;
        }
        ClientMessage::Unsubscribe { feed } => {
            let Some(feed) = parse_feed(&feed, sender) else {
                return;
            };
            // Dropping the simulator cancels its loop and closes the
            // snapshot channel, which ends the forwarder task.
            if subscriptions.remove(&feed).is_some() {
                tracing::info!(conn_id = %conn_id, feed = %feed, "Feed unsubscribed");
            }
            send_frame(
                sender,
                &ServerFrame::Unsubscribed {
                    feed: feed.as_str(),
                },
            );
        }
    }
}

/// Start a simulator for `feed` and wire its snapshots to the connection.
///
/// Subscribing twice is a no-op beyond re-sending the acknowledgement.
async fn subscribe(
    feed: Feed,
    conn_id: &str,
    store: &SharedStore,
    sender: &WsSender,
    subscriptions: &mut HashMap<Feed, LiveSimulator>,
) {
    if subscriptions.contains_key(&feed) {
        send_frame(sender, &ServerFrame::Subscribed { feed: feed.as_str() });
        return;
    }

    let config = seeded_config(feed, store.as_ref()).await;
    let mut simulator = match LiveSimulator::with_uniform_noise(config) {
        Ok(simulator) => simulator,
        Err(e) => {
            tracing::error!(conn_id = %conn_id, feed = %feed, error = %e, "Failed to build simulator");
            send_frame(
                sender,
                &ServerFrame::Error {
                    message: format!("Feed '{feed}' unavailable"),
                },
            );
            return;
        }
    };

    let snapshots = simulator.subscribe();
    simulator.start();
    subscriptions.insert(feed, simulator);
    tokio::spawn(forward_snapshots(feed, snapshots, sender.clone()));

    send_frame(sender, &ServerFrame::Subscribed { feed: feed.as_str() });
    tracing::info!(conn_id = %conn_id, feed = %feed, "Feed subscribed");
}

/// Resolve a feed name or push an error frame.
fn parse_feed(name: &str, sender: &WsSender) -> Option<Feed> {
    let feed = Feed::from_name(name);
    if feed.is_none() {
        send_frame(
            sender,
            &ServerFrame::Error {
                message: format!("Unknown feed '{name}'"),
            },
        );
    }
    feed
}

/// Forward snapshots from one simulator to the connection channel.
///
/// Ends when the simulator is dropped (channel closed) or the connection
/// goes away (send fails).
async fn forward_snapshots(
    feed: Feed,
    mut snapshots: broadcast::Receiver<MetricsSnapshot>,
    sender: WsSender,
) {
    loop {
        match snapshots.recv().await {
            Ok(snapshot) => {
                if !send_frame(&sender, &ServerFrame::Snapshot(&snapshot)) {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(feed = %feed, skipped = n, "Snapshot consumer lagging");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
