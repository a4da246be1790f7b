//! Handler for stateless tolerance classification.

use axum::Json;
use serde::{Deserialize, Serialize};

use advisor_core::aggregate::{self, BandCounts};
use advisor_core::{BandTaxonomy, BandThresholds, MetricReading, StatusBand, ToleranceEvaluator};

use crate::error::AppResult;
use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /evaluate`.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub readings: Vec<MetricReading>,
    /// Band cutoffs; strict (0.5 / 1.0) when omitted.
    #[serde(default)]
    pub thresholds: Option<BandThresholds>,
    /// Display vocabulary; composition labels when omitted.
    #[serde(default)]
    pub taxonomy: Option<BandTaxonomy>,
}

/// One classified reading.
#[derive(Debug, Serialize)]
pub struct EvaluatedReading {
    pub name: String,
    pub current: f64,
    pub target: f64,
    pub tolerance: f64,
    pub unit: String,
    pub band: StatusBand,
    pub status: &'static str,
    pub position: f64,
}

/// Response payload for `POST /evaluate`.
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluations: Vec<EvaluatedReading>,
    pub counts: BandCounts,
    pub quality: f64,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/v1/evaluate
///
/// Classify metric readings against their tolerance windows. Pure
/// computation over the request body; nothing is read from the store.
/// An empty reading list yields empty evaluations and zero aggregates.
pub async fn evaluate_readings(
    Json(request): Json<EvaluateRequest>,
) -> AppResult<Json<DataResponse<EvaluateResponse>>> {
    let thresholds = request.thresholds.unwrap_or_default();
    let taxonomy = request.taxonomy.unwrap_or(BandTaxonomy::Composition);
    let evaluator = ToleranceEvaluator::new(thresholds)?;

    let results = evaluator.evaluate_all(&request.readings)?;
    let counts = aggregate::band_counts(results.iter().map(|e| e.band));
    let quality = aggregate::overall_quality(results.iter().map(|e| e.band));

    let evaluations = request
        .readings
        .iter()
        .zip(results)
        .map(|(reading, evaluation)| EvaluatedReading {
            name: reading.name.clone(),
            current: reading.current,
            target: reading.target,
            tolerance: reading.tolerance,
            unit: reading.unit.clone(),
            band: evaluation.band,
            status: evaluation.band.label(taxonomy),
            position: evaluation.position,
        })
        .collect();

    Ok(Json(DataResponse {
        data: EvaluateResponse {
            evaluations,
            counts,
            quality,
        },
    }))
}
