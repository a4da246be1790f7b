//! Handlers for the `/alerts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use advisor_events::{ProcessEvent, ALERT_CREATED, ALERT_RESOLVED};
use advisor_store::error::StoreError;
use advisor_store::models::{Alert, CreateAlert};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/alerts/active
///
/// All alerts that have not been resolved yet, newest first.
pub async fn active_alerts(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Alert>>>> {
    let alerts = state.store.active_alerts().await?;
    Ok(Json(DataResponse { data: alerts }))
}

/// POST /api/v1/alerts
///
/// Raise a new alert and publish `alert.created`. A store write failure is
/// logged and the alert is echoed back anyway.
pub async fn create_alert(
    State(state): State<AppState>,
    Json(create): Json<CreateAlert>,
) -> AppResult<(StatusCode, Json<DataResponse<Alert>>)> {
    create.validate()?;

    let alert = match state.store.create_alert(create.clone()).await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::error!(
                error = %e,
                source = %create.source,
                "Failed to persist alert, echoing it unstored"
            );
            local_alert(create)
        }
    };

    state.event_bus.publish(
        ProcessEvent::new(ALERT_CREATED)
            .with_source(alert.source.clone())
            .with_payload(serde_json::to_value(&alert).unwrap_or_default()),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: alert })))
}

/// POST /api/v1/alerts/{id}/resolve
///
/// Mark an alert resolved and publish `alert.resolved`. Unknown ids yield
/// 404; any other store failure is logged and the resolution is still
/// acknowledged.
pub async fn resolve_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    match state.store.resolve_alert(id).await {
        Ok(alert) => {
            state.event_bus.publish(
                ProcessEvent::new(ALERT_RESOLVED)
                    .with_source(alert.source.clone())
                    .with_payload(serde_json::to_value(&alert).unwrap_or_default()),
            );
        }
        Err(e @ StoreError::NotFound { .. }) => return Err(e.into()),
        Err(e) => {
            tracing::error!(error = %e, alert_id = %id, "Failed to resolve alert in store, continuing");
            state
                .event_bus
                .publish(ProcessEvent::new(ALERT_RESOLVED).with_payload(json!({ "id": id })));
        }
    }

    Ok(Json(DataResponse {
        data: json!({ "status": "Alert resolved" }),
    }))
}

/// Materialize a stored-row shape for an alert the store did not accept.
fn local_alert(create: CreateAlert) -> Alert {
    Alert {
        id: Uuid::new_v4(),
        title: create.title,
        message: create.message,
        severity: create.severity,
        source: create.source,
        is_resolved: false,
        created_at: Utc::now(),
        resolved_at: None,
    }
}
