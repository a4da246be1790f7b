//! Handlers for the `/recommendations` resource.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use advisor_core::optimizer;
use advisor_core::recommendation;
use advisor_core::types::Timestamp;
use advisor_events::{ProcessEvent, RECOMMENDATION_GENERATED};
use advisor_store::models::{AlloyRecommendation, CreateRecommendation};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /recommendations`.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    /// Maximum number of results. Defaults to 10, capped at 100.
    pub limit: Option<u32>,
}

/// Maximum page size for recommendation listing.
const MAX_LIMIT: u32 = 100;

/// Default page size for recommendation listing.
const DEFAULT_LIMIT: u32 = 10;

/// Request body carrying a target and current composition.
///
/// Both maps default to empty so a missing key produces the documented
/// 400, not a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CompositionPair {
    #[serde(default)]
    pub target_composition: BTreeMap<String, f64>,
    #[serde(default)]
    pub current_composition: BTreeMap<String, f64>,
}

impl CompositionPair {
    fn validate(&self) -> Result<(), AppError> {
        if self.target_composition.is_empty() || self.current_composition.is_empty() {
            return Err(AppError::BadRequest(
                "Both target_composition and current_composition are required".to_string(),
            ));
        }
        let finite = self
            .target_composition
            .values()
            .chain(self.current_composition.values())
            .all(|v| v.is_finite());
        if !finite {
            return Err(AppError::BadRequest(
                "composition values must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }
}

/// One formatted material addition suggestion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionSuggestion {
    pub id: String,
    pub alloy_type: String,
    /// Kilograms of material per tonne of melt.
    pub quantity: f64,
    pub unit: &'static str,
    pub confidence: f64,
    pub reason: String,
    pub estimated_cost: f64,
    pub expected_improvement: Vec<ExpectedImprovement>,
}

/// The content change one addition is expected to produce.
#[derive(Debug, Serialize)]
pub struct ExpectedImprovement {
    pub element: String,
    pub from: f64,
    pub to: f64,
}

/// Response payload for `POST /recommendations/additions`.
#[derive(Debug, Serialize)]
pub struct AdditionsResponse {
    pub recommendations: Vec<AdditionSuggestion>,
    pub generated_at: Timestamp,
    pub analysis_confidence: &'static str,
}

/// Flat rate used for the estimated cost of a material addition.
const COST_PER_KG: f64 = 12.5;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/recommendations
///
/// The most recent recommendation records, newest first.
pub async fn recent_recommendations(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<AlloyRecommendation>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let recommendations = state.store.recent_recommendations(limit).await?;
    Ok(Json(DataResponse {
        data: recommendations,
    }))
}

/// POST /api/v1/recommendations/generate
///
/// Build an element adjustment plan for the given compositions, persist it,
/// and publish `recommendation.generated`. A store write failure is logged
/// and the plan is echoed back anyway.
pub async fn generate_recommendation(
    State(state): State<AppState>,
    Json(pair): Json<CompositionPair>,
) -> AppResult<(StatusCode, Json<DataResponse<AlloyRecommendation>>)> {
    pair.validate()?;

    let plan = recommendation::build_plan(
        &pair.target_composition,
        &pair.current_composition,
        &mut rand::rng(),
    );
    let create =
        CreateRecommendation::from_plan(pair.target_composition, pair.current_composition, plan);

    let record = match state.store.insert_recommendation(create.clone()).await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::error!(error = %e, "Failed to persist recommendation, echoing it unstored");
            local_recommendation(create)
        }
    };

    state.event_bus.publish(
        ProcessEvent::new(RECOMMENDATION_GENERATED)
            .with_payload(serde_json::to_value(&record).unwrap_or_default()),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// POST /api/v1/recommendations/additions
///
/// Suggest carrier material additions that move the current composition
/// toward the target. Pure computation, nothing is persisted.
pub async fn material_additions(
    Json(pair): Json<CompositionPair>,
) -> AppResult<Json<DataResponse<AdditionsResponse>>> {
    pair.validate()?;

    let additions = optimizer::material_additions(
        &pair.target_composition,
        &pair.current_composition,
        &mut rand::rng(),
    );

    let recommendations = additions
        .into_iter()
        .enumerate()
        .map(|(i, addition)| AdditionSuggestion {
            id: format!("rec_{}", i + 1),
            alloy_type: addition.material.to_string(),
            quantity: round2(addition.quantity),
            unit: "kg",
            confidence: round1(addition.confidence),
            reason: format!(
                "{} content {:.3}% needs adjustment to {:.3}%",
                addition.element, addition.current, addition.target
            ),
            estimated_cost: round2(addition.quantity * COST_PER_KG),
            expected_improvement: vec![ExpectedImprovement {
                element: addition.element,
                from: addition.current,
                to: addition.target,
            }],
        })
        .collect();

    Ok(Json(DataResponse {
        data: AdditionsResponse {
            recommendations,
            generated_at: Utc::now(),
            analysis_confidence: "high",
        },
    }))
}

/// Materialize a stored-row shape for a plan the store did not accept.
fn local_recommendation(create: CreateRecommendation) -> AlloyRecommendation {
    AlloyRecommendation {
        id: Uuid::new_v4(),
        target_composition: create.target_composition,
        current_composition: create.current_composition,
        recommendations: create.recommendations,
        cost_impact: create.cost_impact,
        quality_improvement: create.quality_improvement,
        created_at: Utc::now(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
