//! Handlers for the `/readings` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use advisor_events::{ProcessEvent, READING_RECORDED};
use advisor_store::models::{CreateProcessReading, ProcessReading};

use crate::error::{AppError, AppResult};
use crate::query::WindowParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /readings/by-furnace`.
#[derive(Debug, Deserialize)]
pub struct FurnaceParams {
    pub furnace_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/readings/recent
///
/// Readings recorded within the last `?hours=` hours (default 24, max 168),
/// newest first.
pub async fn recent_readings(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> AppResult<Json<DataResponse<Vec<ProcessReading>>>> {
    let hours = params.resolve()?;
    let readings = state.store.recent_readings(hours).await?;
    Ok(Json(DataResponse { data: readings }))
}

/// GET /api/v1/readings/by-furnace
///
/// All readings for the furnace named by `?furnace_id=`, newest first.
pub async fn readings_by_furnace(
    State(state): State<AppState>,
    Query(params): Query<FurnaceParams>,
) -> AppResult<Json<DataResponse<Vec<ProcessReading>>>> {
    let furnace_id = params
        .furnace_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Furnace ID required".to_string()))?;

    let readings = state.store.readings_by_furnace(furnace_id).await?;
    Ok(Json(DataResponse { data: readings }))
}

/// POST /api/v1/readings
///
/// Record a new process reading and publish `reading.recorded`.
///
/// A store write failure is logged and the reading is echoed back anyway:
/// the monitoring loop must not stall on a flaky store.
pub async fn create_reading(
    State(state): State<AppState>,
    Json(create): Json<CreateProcessReading>,
) -> AppResult<(StatusCode, Json<DataResponse<ProcessReading>>)> {
    create.validate()?;

    let reading = match state.store.insert_reading(create.clone()).await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::error!(
                error = %e,
                furnace_id = %create.furnace_id,
                "Failed to persist reading, echoing it unstored"
            );
            local_reading(create)
        }
    };

    state.event_bus.publish(
        ProcessEvent::new(READING_RECORDED)
            .with_source(reading.furnace_id.clone())
            .with_payload(serde_json::to_value(&reading).unwrap_or_default()),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: reading })))
}

/// Materialize a stored-row shape for a reading the store did not accept.
fn local_reading(create: CreateProcessReading) -> ProcessReading {
    ProcessReading {
        id: Uuid::new_v4(),
        timestamp: create.timestamp.unwrap_or_else(Utc::now),
        furnace_id: create.furnace_id,
        temperature: create.temperature,
        pressure: create.pressure,
        oxygen_level: create.oxygen_level,
        composition: create.composition,
        quality_score: create.quality_score,
    }
}
