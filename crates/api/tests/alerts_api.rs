//! HTTP-level integration tests for the `/alerts` API endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, build_test_app, build_test_app_with, get, post, post_json, DownStore};
use serde_json::json;
use uuid::Uuid;

use advisor_core::alert::Severity;
use advisor_store::models::Alert;
use advisor_store::InMemoryStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn alert(title: &str, minutes_ago: i64) -> Alert {
    Alert {
        id: Uuid::new_v4(),
        title: title.to_string(),
        message: format!("{title} raised by test setup"),
        severity: Severity::High,
        source: "FURNACE_001".to_string(),
        is_resolved: false,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
        resolved_at: None,
    }
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/alerts/active lists the standing mock alerts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn active_alerts_list_the_standing_mock_alerts() {
    let app = build_test_app();
    let response = get(app, "/api/v1/alerts/active").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // Newest first: the temperature alert was raised after the inventory one.
    assert_eq!(rows[0]["title"], "Temperature Deviation");
    assert_eq!(rows[0]["severity"], "high");
    assert_eq!(rows[1]["title"], "Low Inventory Warning");
    assert_eq!(rows[1]["severity"], "medium");
    assert!(rows.iter().all(|r| r["is_resolved"] == false));
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/alerts stores the alert and returns it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_alert_persists_and_returns_the_row() {
    let store = Arc::new(InMemoryStore::new());
    let app = build_test_app_with(store);

    let body = json!({
        "title": "Pressure Spike",
        "message": "Vessel pressure exceeded 3.2 bar",
        "severity": "critical",
        "source": "FURNACE_002"
    });

    let response = post_json(app.clone(), "/api/v1/alerts", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Pressure Spike");
    assert_eq!(json["data"]["severity"], "critical");
    assert_eq!(json["data"]["is_resolved"], false);
    assert!(json["data"]["id"].is_string());

    let response = get(app, "/api/v1/alerts/active").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/alerts rejects an empty title
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_alert_rejects_an_empty_title() {
    let app = build_test_app();

    let body = json!({
        "title": "",
        "message": "something happened",
        "severity": "low",
        "source": "FURNACE_001"
    });

    let response = post_json(app, "/api/v1/alerts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/alerts/{id}/resolve acknowledges and clears the alert
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolve_alert_acknowledges_and_clears_the_alert() {
    let store = Arc::new(InMemoryStore::new());
    let seeded = alert("Slag Carryover", 3);
    let id = seeded.id;
    store.seed_alerts(vec![seeded]).await;

    let app = build_test_app_with(store);
    let response = post(app.clone(), &format!("/api/v1/alerts/{id}/resolve")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Alert resolved");

    let response = get(app, "/api/v1/alerts/active").await;
    let json = body_json(response).await;
    assert!(
        json["data"].as_array().unwrap().is_empty(),
        "resolved alerts must leave the active list"
    );
}

// ---------------------------------------------------------------------------
// Test: resolving an unknown alert id returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolve_alert_returns_404_for_an_unknown_id() {
    let app = build_test_app_with(Arc::new(InMemoryStore::new()));

    let response = post(app, &format!("/api/v1/alerts/{}/resolve", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: a failing store does not fail the resolve request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolve_alert_is_acknowledged_when_the_store_is_down() {
    let app = build_test_app_with(Arc::new(DownStore));

    let response = post(app, &format!("/api/v1/alerts/{}/resolve", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Alert resolved");
}
