//! Handlers for `/analytics` and the `/dashboard` summary.
//!
//! These endpoints derive their numbers from recent store history. Reads go
//! through the fallback store, so a dead upstream yields demo data here
//! instead of errors.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use advisor_core::aggregate;
use advisor_core::alert::Severity;
use advisor_core::anomaly::{self, Anomaly, TemperatureSample};
use advisor_core::composition;
use advisor_store::models::ProcessReading;

use crate::error::{AppError, AppResult};
use crate::query::WindowParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /analytics/quality`.
#[derive(Debug, Deserialize)]
pub struct QualityParams {
    pub hours: Option<u32>,
    /// Restrict the analysis to one furnace.
    pub furnace_id: Option<String>,
}

/// Alloy grade the composition scores are checked against.
const ANALYSIS_GRADE: &str = "316L";

/// How many of the newest scores decide the trend label.
const TREND_WINDOW: usize = 5;

/// A trend window with fewer distinct values than this reads as stable.
const TREND_DISTINCT_CUTOFF: usize = 3;

/// Response payload for `GET /analytics/quality`.
#[derive(Debug, Serialize)]
pub struct QualityAnalysis {
    pub average_quality_score: f64,
    pub total_samples: usize,
    pub quality_trend: &'static str,
    pub anomalies_detected: usize,
    pub anomalies: Vec<Anomaly>,
    pub analysis_period_hours: u32,
}

/// Response payload for `GET /analytics/system`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAnalytics {
    pub total_readings: usize,
    pub avg_quality: f64,
    pub critical_alerts: usize,
    pub avg_confidence: f64,
    pub system_uptime: f64,
    pub energy_efficiency: f64,
    pub cost_savings: f64,
}

/// Response payload for `GET /dashboard/metrics`.
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub production_efficiency: f64,
    pub active_alerts: usize,
    pub furnaces_online: usize,
    pub daily_production: &'static str,
    pub energy_efficiency: &'static str,
    pub recent_activity: Vec<ActivityEntry>,
}

/// One row of the dashboard activity feed.
#[derive(Debug, Serialize)]
pub struct ActivityEntry {
    /// Wall-clock time, `HH:MM`.
    pub time: String,
    pub furnace: String,
    pub temperature: f64,
    pub quality: f64,
}

/// Quality assumed for readings that carry no score.
const ASSUMED_QUALITY: f64 = 85.0;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/analytics/quality
///
/// Composition quality statistics and temperature anomaly screening over
/// the requested window. An empty window yields 404, matching a dashboard
/// that treats "no data" as a missing resource rather than a zero report.
pub async fn quality_analysis(
    State(state): State<AppState>,
    Query(params): Query<QualityParams>,
) -> AppResult<Json<DataResponse<QualityAnalysis>>> {
    let hours = WindowParams {
        hours: params.hours,
    }
    .resolve()?;

    let mut readings = state.store.recent_readings(hours).await?;
    if let Some(furnace_id) = &params.furnace_id {
        readings.retain(|r| &r.furnace_id == furnace_id);
    }
    if readings.is_empty() {
        return Err(AppError::NotFound("No recent data found".to_string()));
    }

    // Score every reading that carries a composition. Readings arrive
    // newest first, so the scores do too.
    let scores: Vec<f64> = readings
        .iter()
        .filter(|r| !r.composition.is_empty())
        .map(|r| composition::quality_score(&r.composition, ANALYSIS_GRADE))
        .collect();

    // Anomaly screening wants the series oldest first.
    let samples: Vec<TemperatureSample> = readings
        .iter()
        .rev()
        .map(|r| TemperatureSample {
            furnace_id: r.furnace_id.clone(),
            timestamp: r.timestamp,
            temperature: r.temperature,
        })
        .collect();
    let anomalies = anomaly::detect_temperature_anomalies(&samples);

    Ok(Json(DataResponse {
        data: QualityAnalysis {
            average_quality_score: round2(aggregate::mean(&scores)),
            total_samples: readings.len(),
            quality_trend: trend_label(&scores),
            anomalies_detected: anomalies.len(),
            anomalies,
            analysis_period_hours: hours,
        },
    }))
}

/// GET /api/v1/analytics/system
///
/// System-wide totals over the last day, plus the fixed demo figures the
/// dashboard header shows (uptime, energy efficiency, cost savings).
pub async fn system_analytics(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SystemAnalytics>>> {
    let readings = state.store.recent_readings(24).await?;
    let alerts = state.store.active_alerts().await?;
    let recommendations = state.store.recent_recommendations(10).await?;

    let qualities: Vec<f64> = readings
        .iter()
        .map(|r| r.quality_score.unwrap_or(0.0))
        .collect();
    let confidences: Vec<f64> = recommendations
        .iter()
        .map(|r| r.mean_confidence())
        .collect();
    let critical_alerts = alerts
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count();

    Ok(Json(DataResponse {
        data: SystemAnalytics {
            total_readings: readings.len(),
            avg_quality: aggregate::mean(&qualities),
            critical_alerts,
            avg_confidence: aggregate::mean(&confidences),
            system_uptime: 99.2,
            energy_efficiency: 87.5,
            cost_savings: 1250.30,
        },
    }))
}

/// GET /api/v1/dashboard/metrics
///
/// Aggregated summary for the dashboard landing view.
pub async fn dashboard_metrics(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardMetrics>>> {
    let readings = state.store.recent_readings(24).await?;
    let alerts = state.store.active_alerts().await?;

    let production_efficiency = if readings.is_empty() {
        ASSUMED_QUALITY
    } else {
        let recent: Vec<f64> = readings
            .iter()
            .take(10)
            .map(|r| r.quality_score.unwrap_or(ASSUMED_QUALITY))
            .collect();
        round1(aggregate::mean(&recent))
    };

    let recent_activity = readings.iter().take(5).map(activity_entry).collect();

    Ok(Json(DataResponse {
        data: DashboardMetrics {
            production_efficiency,
            active_alerts: alerts.len(),
            furnaces_online: distinct_furnaces(&readings),
            daily_production: "47.2 tons",
            energy_efficiency: "92.8%",
            recent_activity,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Label the newest scores stable or variable by how many distinct values
/// they contain.
fn trend_label(scores: &[f64]) -> &'static str {
    let mut distinct: Vec<u64> = scores
        .iter()
        .take(TREND_WINDOW)
        .map(|s| s.to_bits())
        .collect();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < TREND_DISTINCT_CUTOFF {
        "stable"
    } else {
        "variable"
    }
}

/// Count the furnaces that reported within the window.
fn distinct_furnaces(readings: &[ProcessReading]) -> usize {
    let mut ids: Vec<&str> = readings.iter().map(|r| r.furnace_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
}

fn activity_entry(reading: &ProcessReading) -> ActivityEntry {
    ActivityEntry {
        time: reading.timestamp.format("%H:%M").to_string(),
        furnace: reading.furnace_id.clone(),
        temperature: reading.temperature,
        quality: reading.quality_score.unwrap_or(ASSUMED_QUALITY),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
