use std::net::SocketAddr;

use advisor_store::client::DEFAULT_BASE_URL;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Base URL of the upstream process data store API.
    pub store_url: String,
    /// Per-request timeout for store calls, in seconds.
    pub store_timeout_secs: u64,
    /// Allowed CORS origin. `None` means any origin is allowed, which suits
    /// a dashboard served from a dev server on a changing port.
    pub cors_origin: Option<String>,
    /// Buffer capacity of the in-process event bus.
    pub event_capacity: usize,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                     |
    /// |------------------------------|-----------------------------|
    /// | `ADVISOR_BIND_ADDR`          | `0.0.0.0:8080`              |
    /// | `ADVISOR_STORE_URL`          | `http://localhost:8000/api` |
    /// | `ADVISOR_STORE_TIMEOUT_SECS` | `10`                        |
    /// | `ADVISOR_CORS_ORIGIN`        | unset (allow any origin)    |
    /// | `ADVISOR_EVENT_CAPACITY`     | `256`                       |
    /// | `ADVISOR_REQUEST_TIMEOUT_SECS` | `30`                      |
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = std::env::var("ADVISOR_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".into())
            .parse()
            .expect("ADVISOR_BIND_ADDR must be a valid socket address");

        let store_url =
            std::env::var("ADVISOR_STORE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let store_timeout_secs: u64 = std::env::var("ADVISOR_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("ADVISOR_STORE_TIMEOUT_SECS must be a valid u64");

        let cors_origin = std::env::var("ADVISOR_CORS_ORIGIN")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let event_capacity: usize = std::env::var("ADVISOR_EVENT_CAPACITY")
            .unwrap_or_else(|_| "256".into())
            .parse()
            .expect("ADVISOR_EVENT_CAPACITY must be a valid usize");

        let request_timeout_secs: u64 = std::env::var("ADVISOR_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("ADVISOR_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            bind_addr,
            store_url,
            store_timeout_secs,
            cors_origin,
            event_capacity,
            request_timeout_secs,
        }
    }
}
