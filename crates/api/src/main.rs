use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_api::config::ServerConfig;
use advisor_api::{router, state, ws};
use advisor_events::EventBus;
use advisor_store::{FallbackStore, RestStore, SharedStore};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advisor_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        bind_addr = %config.bind_addr,
        store_url = %config.store_url,
        "Configuration loaded"
    );

    // --- Process data store ---
    // The fallback wrapper answers reads from mock data whenever the REST
    // store fails, so only client construction can abort startup.
    let rest = RestStore::new(
        config.store_url.clone(),
        Duration::from_secs(config.store_timeout_secs),
    )
    .expect("Failed to build the store HTTP client");
    let store: SharedStore = Arc::new(FallbackStore::new(rest));

    // --- WebSocket plumbing ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Event bus + forwarder ---
    let event_bus = Arc::new(EventBus::new(config.event_capacity));
    let forwarder_handle = tokio::spawn(ws::forward_events(
        Arc::clone(&ws_manager),
        event_bus.subscribe(),
    ));
    tracing::info!(capacity = config.event_capacity, "Event bus running");

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
    };

    let app = router::build_app_router(state, &config);

    // --- Serve ---
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(addr = %config.bind_addr, "Alloy advisor API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");

    // --- Post-shutdown cleanup ---
    // The serve future resolving dropped the router and its state clones,
    // leaving `event_bus` as the last sender. Dropping it closes the
    // broadcast channel and lets the forwarder drain out.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), forwarder_handle).await;
    tracing::info!("Event forwarder drained");

    // Closing the sockets drops each connection's simulators with them.
    ws_manager.shutdown_all().await;
    heartbeat_handle.abort();

    tracing::info!("Shutdown complete");
}

/// Resolves when the process is asked to stop.
///
/// Watches SIGINT for interactive use and SIGTERM for process managers
/// (Docker, systemd). Either one starts graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!(signal = "SIGINT", "Shutting down"),
        () = terminate => tracing::info!(signal = "SIGTERM", "Shutting down"),
    }
}
