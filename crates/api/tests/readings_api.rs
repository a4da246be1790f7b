//! HTTP-level integration tests for the `/readings` API endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Scenarios are set up by seeding an in-memory store, then verified
//! through the HTTP API.

mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use common::{body_json, build_test_app, build_test_app_with, get, post_json, DownStore};
use serde_json::json;
use uuid::Uuid;

use advisor_store::models::ProcessReading;
use advisor_store::InMemoryStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn reading(furnace_id: &str, minutes_ago: i64, temperature: f64) -> ProcessReading {
    ProcessReading {
        id: Uuid::new_v4(),
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
        furnace_id: furnace_id.to_string(),
        temperature,
        pressure: 2.5,
        oxygen_level: 125.0,
        composition: BTreeMap::from([("C".to_string(), 3.5)]),
        quality_score: Some(92.0),
    }
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/readings/recent returns the mock series newest first
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recent_readings_return_the_mock_series_newest_first() {
    let app = build_test_app();
    let response = get(app, "/api/v1/readings/recent").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 20);

    for row in rows {
        assert_eq!(row["furnace_id"], "FURNACE_001");
        assert!(row["composition"]["C"].is_number());
    }

    let newest = DateTime::parse_from_rfc3339(rows[0]["timestamp"].as_str().unwrap()).unwrap();
    let oldest = DateTime::parse_from_rfc3339(rows[19]["timestamp"].as_str().unwrap()).unwrap();
    assert!(newest > oldest, "rows must be ordered newest first");
}

// ---------------------------------------------------------------------------
// Test: the hours window only admits 1..=168
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recent_readings_reject_an_out_of_range_window() {
    let app = build_test_app();

    let response = get(app.clone(), "/api/v1/readings/recent?hours=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "hours must be between 1 and 168");

    let response = get(app, "/api/v1/readings/recent?hours=200").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: a narrow window excludes older readings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recent_readings_honour_the_hours_window() {
    let store = Arc::new(InMemoryStore::new());
    store
        .seed_readings(vec![
            reading("FURNACE_001", 30, 1650.0),
            reading("FURNACE_001", 3 * 60, 1648.0),
        ])
        .await;

    let app = build_test_app_with(store);
    let response = get(app, "/api/v1/readings/recent?hours=1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/readings/by-furnace requires a furnace id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn readings_by_furnace_require_a_furnace_id() {
    let app = build_test_app();
    let response = get(app, "/api/v1/readings/by-furnace").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Furnace ID required");
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/readings/by-furnace filters to that furnace
// ---------------------------------------------------------------------------

#[tokio::test]
async fn readings_by_furnace_filter_to_that_furnace() {
    let store = Arc::new(InMemoryStore::new());
    store
        .seed_readings(vec![
            reading("FURNACE_001", 10, 1650.0),
            reading("FURNACE_002", 5, 1632.0),
            reading("FURNACE_002", 15, 1628.0),
        ])
        .await;

    let app = build_test_app_with(store);
    let response = get(app, "/api/v1/readings/by-furnace?furnace_id=FURNACE_002").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["furnace_id"] == "FURNACE_002"));
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/readings stores the reading and returns it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_reading_persists_and_returns_the_row() {
    let store = Arc::new(InMemoryStore::new());
    let app = build_test_app_with(store);

    let body = json!({
        "furnace_id": "FURNACE_007",
        "temperature": 1655.2,
        "pressure": 2.4,
        "oxygen_level": 123.0,
        "composition": { "C": 3.48, "Si": 2.15 },
        "quality_score": 94.5
    });

    let response = post_json(app.clone(), "/api/v1/readings", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["furnace_id"], "FURNACE_007");
    assert!(json["data"]["id"].is_string());
    assert!(json["data"]["timestamp"].is_string());

    // The row is now visible through the read endpoints.
    let response = get(app, "/api/v1/readings/by-furnace?furnace_id=FURNACE_007").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/readings rejects a blank furnace id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_reading_rejects_a_blank_furnace_id() {
    let app = build_test_app();

    let body = json!({
        "furnace_id": "   ",
        "temperature": 1650.0,
        "pressure": 2.5,
        "oxygen_level": 125.0
    });

    let response = post_json(app, "/api/v1/readings", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: a failing store does not fail the write request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_reading_is_acknowledged_when_the_store_is_down() {
    let app = build_test_app_with(Arc::new(DownStore));

    let body = json!({
        "furnace_id": "FURNACE_001",
        "temperature": 1651.0,
        "pressure": 2.5,
        "oxygen_level": 124.0
    });

    let response = post_json(app, "/api/v1/readings", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The reading is echoed back with a locally generated id.
    let json = body_json(response).await;
    assert_eq!(json["data"]["furnace_id"], "FURNACE_001");
    assert!(json["data"]["id"].is_string());
}
