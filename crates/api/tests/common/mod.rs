//! Shared helpers for the API integration tests.
//!
//! Tests build the full application router, including every middleware
//! layer, over an in-memory store and drive it with
//! `tower::ServiceExt::oneshot`. No TCP listener or upstream service is
//! involved.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use tower::ServiceExt;

use async_trait::async_trait;
use uuid::Uuid;

use advisor_api::config::ServerConfig;
use advisor_api::router::build_app_router;
use advisor_api::state::AppState;
use advisor_api::ws::WsManager;
use advisor_events::EventBus;
use advisor_store::models::{
    Alert, AlloyRecommendation, CreateAlert, CreateProcessReading, CreateRecommendation,
    ProcessReading,
};
use advisor_store::{InMemoryStore, ProcessStore, SharedStore, StoreError};

/// Build a test `ServerConfig` with safe defaults.
///
/// The bind address and store URL are never used: tests drive the router
/// directly and supply their own store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        store_url: "http://localhost:1".to_string(),
        store_timeout_secs: 1,
        cors_origin: None,
        event_capacity: 64,
        request_timeout_secs: 30,
    }
}

/// Build the application router over the built-in mock dataset: 20 readings
/// for `FURNACE_001`, 2 active alerts, and 1 recommendation record.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(InMemoryStore::with_mock_data()))
}

/// Build the application router over a caller-provided store, for tests
/// needing an empty, seeded, or failing backend.
///
/// Uses the same `build_app_router` as `main.rs`, so requests pass through
/// the production middleware stack (request ID, timeout, tracing, panic
/// recovery, CORS).
pub fn build_test_app_with(store: SharedStore) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::new(config.event_capacity)),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a bodiless POST request to the app and return the raw response.
pub async fn post(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store whose every call fails with an upstream 503.
pub struct DownStore;

fn unavailable() -> StoreError {
    StoreError::Status {
        status: 503,
        body: "maintenance".to_string(),
    }
}

#[async_trait]
impl ProcessStore for DownStore {
    async fn recent_readings(&self, _hours: u32) -> Result<Vec<ProcessReading>, StoreError> {
        Err(unavailable())
    }

    async fn readings_by_furnace(
        &self,
        _furnace_id: &str,
    ) -> Result<Vec<ProcessReading>, StoreError> {
        Err(unavailable())
    }

    async fn insert_reading(
        &self,
        _reading: CreateProcessReading,
    ) -> Result<ProcessReading, StoreError> {
        Err(unavailable())
    }

    async fn active_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        Err(unavailable())
    }

    async fn create_alert(&self, _alert: CreateAlert) -> Result<Alert, StoreError> {
        Err(unavailable())
    }

    async fn resolve_alert(&self, _id: Uuid) -> Result<Alert, StoreError> {
        Err(unavailable())
    }

    async fn recent_recommendations(
        &self,
        _limit: u32,
    ) -> Result<Vec<AlloyRecommendation>, StoreError> {
        Err(unavailable())
    }

    async fn insert_recommendation(
        &self,
        _recommendation: CreateRecommendation,
    ) -> Result<AlloyRecommendation, StoreError> {
        Err(unavailable())
    }
}
