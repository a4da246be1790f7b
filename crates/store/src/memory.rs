//! In-memory store for integration tests and offline runs.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::mock;
use crate::models::{
    Alert, AlloyRecommendation, CreateAlert, CreateProcessReading, CreateRecommendation,
    ProcessReading,
};
use crate::ProcessStore;

/// Cap applied by [`ProcessStore::readings_by_furnace`].
const FURNACE_READING_CAP: usize = 100;

/// A [`ProcessStore`] backed by in-process vectors.
#[derive(Default)]
pub struct InMemoryStore {
    readings: RwLock<Vec<ProcessReading>>,
    alerts: RwLock<Vec<Alert>>,
    recommendations: RwLock<Vec<AlloyRecommendation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the standard mock data set.
    pub fn with_mock_data() -> Self {
        Self {
            readings: RwLock::new(mock::process_readings()),
            alerts: RwLock::new(mock::alerts()),
            recommendations: RwLock::new(mock::recommendations()),
        }
    }

    /// Replace the stored readings (test setup helper).
    pub async fn seed_readings(&self, readings: Vec<ProcessReading>) {
        *self.readings.write().await = readings;
    }

    /// Replace the stored alerts (test setup helper).
    pub async fn seed_alerts(&self, alerts: Vec<Alert>) {
        *self.alerts.write().await = alerts;
    }
}

#[async_trait]
impl ProcessStore for InMemoryStore {
    async fn recent_readings(&self, hours: u32) -> Result<Vec<ProcessReading>, StoreError> {
        let cutoff = Utc::now() - Duration::hours(i64::from(hours));
        let mut result: Vec<ProcessReading> = self
            .readings
            .read()
            .await
            .iter()
            .filter(|r| r.timestamp >= cutoff)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(result)
    }

    async fn readings_by_furnace(
        &self,
        furnace_id: &str,
    ) -> Result<Vec<ProcessReading>, StoreError> {
        let mut result: Vec<ProcessReading> = self
            .readings
            .read()
            .await
            .iter()
            .filter(|r| r.furnace_id == furnace_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        result.truncate(FURNACE_READING_CAP);
        Ok(result)
    }

    async fn insert_reading(
        &self,
        reading: CreateProcessReading,
    ) -> Result<ProcessReading, StoreError> {
        let stored = ProcessReading {
            id: Uuid::new_v4(),
            timestamp: reading.timestamp.unwrap_or_else(Utc::now),
            furnace_id: reading.furnace_id,
            temperature: reading.temperature,
            pressure: reading.pressure,
            oxygen_level: reading.oxygen_level,
            composition: reading.composition,
            quality_score: reading.quality_score,
        };
        self.readings.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn active_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        let mut result: Vec<Alert> = self
            .alerts
            .read()
            .await
            .iter()
            .filter(|a| !a.is_resolved)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn create_alert(&self, alert: CreateAlert) -> Result<Alert, StoreError> {
        let stored = Alert {
            id: Uuid::new_v4(),
            title: alert.title,
            message: alert.message,
            severity: alert.severity,
            source: alert.source,
            is_resolved: false,
            created_at: Utc::now(),
            resolved_at: None,
        };
        self.alerts.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn resolve_alert(&self, id: Uuid) -> Result<Alert, StoreError> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound {
                entity: "alert",
                id: id.to_string(),
            })?;
        alert.is_resolved = true;
        alert.resolved_at = Some(Utc::now());
        Ok(alert.clone())
    }

    async fn recent_recommendations(
        &self,
        limit: u32,
    ) -> Result<Vec<AlloyRecommendation>, StoreError> {
        let mut result: Vec<AlloyRecommendation> =
            self.recommendations.read().await.iter().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit as usize);
        Ok(result)
    }

    async fn insert_recommendation(
        &self,
        recommendation: CreateRecommendation,
    ) -> Result<AlloyRecommendation, StoreError> {
        let stored = AlloyRecommendation {
            id: Uuid::new_v4(),
            target_composition: recommendation.target_composition,
            current_composition: recommendation.current_composition,
            recommendations: recommendation.recommendations,
            cost_impact: recommendation.cost_impact,
            quality_improvement: recommendation.quality_improvement,
            created_at: Utc::now(),
        };
        self.recommendations.write().await.push(stored.clone());
        Ok(stored)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
