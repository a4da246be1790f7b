//! Handlers for the `/feeds` resource.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use advisor_core::ToleranceEvaluator;
use advisor_sim::seed::seeded_config;
use advisor_sim::{Feed, MetricState, MetricsSnapshot};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Catalog entry for one live feed.
#[derive(Debug, Serialize)]
pub struct FeedDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub interval_ms: u64,
    pub metrics: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/feeds
///
/// Descriptors for every live feed the WebSocket endpoint can stream.
pub async fn list_feeds() -> Json<DataResponse<Vec<FeedDescriptor>>> {
    let feeds = Feed::ALL
        .iter()
        .map(|feed| {
            let config = feed.config();
            FeedDescriptor {
                name: feed.as_str(),
                description: feed.description(),
                interval_ms: config.interval.as_millis() as u64,
                metrics: config.metrics.len(),
            }
        })
        .collect();
    Json(DataResponse { data: feeds })
}

/// GET /api/v1/feeds/{feed}/snapshot
///
/// One evaluated snapshot of the feed's metrics, seeded from the latest
/// store data where the feed supports it. No simulation is started; the
/// snapshot carries sequence number 0 to distinguish it from the live
/// stream, whose sequences start at 1.
pub async fn feed_snapshot(
    State(state): State<AppState>,
    Path(feed): Path<String>,
) -> AppResult<Json<DataResponse<MetricsSnapshot>>> {
    let Some(feed) = Feed::from_name(&feed) else {
        return Err(AppError::NotFound(format!("Unknown feed '{feed}'")));
    };

    let config = seeded_config(feed, state.store.as_ref()).await;
    let evaluator = ToleranceEvaluator::new(config.thresholds)?;

    let mut metrics = Vec::with_capacity(config.metrics.len());
    for spec in &config.metrics {
        let evaluation = evaluator.evaluate(&spec.reading)?;
        metrics.push(MetricState::new(
            spec.reading.name.clone(),
            spec.reading.unit.clone(),
            spec.reading.current,
            spec.reading.target,
            spec.reading.tolerance,
            evaluation.band,
            config.taxonomy,
            evaluation.position,
        ));
    }

    Ok(Json(DataResponse {
        data: MetricsSnapshot {
            feed: config.feed,
            seq: 0,
            captured_at: Utc::now(),
            metrics,
        },
    }))
}
