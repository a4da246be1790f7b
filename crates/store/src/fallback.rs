//! Read-degradation wrapper around any process store.
//!
//! Live monitoring must not starve because the upstream store is down, so
//! every read that fails is answered from [`crate::mock`] instead, with a
//! warning logged. Writes are journal entries, not display data: their
//! errors propagate so the caller can log and carry on.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::mock;
use crate::models::{
    Alert, AlloyRecommendation, CreateAlert, CreateProcessReading, CreateRecommendation,
    ProcessReading,
};
use crate::ProcessStore;

/// Wraps a [`ProcessStore`] and substitutes mock data for failed reads.
pub struct FallbackStore<S> {
    inner: S,
}

impl<S> FallbackStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ProcessStore> ProcessStore for FallbackStore<S> {
    async fn recent_readings(&self, hours: u32) -> Result<Vec<ProcessReading>, StoreError> {
        match self.inner.recent_readings(hours).await {
            Ok(readings) => Ok(readings),
            Err(e) => {
                tracing::warn!(error = %e, hours, "Store read failed, serving mock process readings");
                Ok(mock::process_readings())
            }
        }
    }

    async fn readings_by_furnace(
        &self,
        furnace_id: &str,
    ) -> Result<Vec<ProcessReading>, StoreError> {
        match self.inner.readings_by_furnace(furnace_id).await {
            Ok(readings) => Ok(readings),
            Err(e) => {
                tracing::warn!(error = %e, furnace_id, "Store read failed, serving mock furnace readings");
                let mut readings = mock::process_readings();
                readings.retain(|r| r.furnace_id == furnace_id);
                Ok(readings)
            }
        }
    }

    async fn insert_reading(
        &self,
        reading: CreateProcessReading,
    ) -> Result<ProcessReading, StoreError> {
        self.inner.insert_reading(reading).await
    }

    async fn active_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        match self.inner.active_alerts().await {
            Ok(alerts) => Ok(alerts),
            Err(e) => {
                tracing::warn!(error = %e, "Store read failed, serving mock alerts");
                Ok(mock::alerts())
            }
        }
    }

    async fn create_alert(&self, alert: CreateAlert) -> Result<Alert, StoreError> {
        self.inner.create_alert(alert).await
    }

    async fn resolve_alert(&self, id: Uuid) -> Result<Alert, StoreError> {
        self.inner.resolve_alert(id).await
    }

    async fn recent_recommendations(
        &self,
        limit: u32,
    ) -> Result<Vec<AlloyRecommendation>, StoreError> {
        match self.inner.recent_recommendations(limit).await {
            Ok(recommendations) => Ok(recommendations),
            Err(e) => {
                tracing::warn!(error = %e, "Store read failed, serving mock recommendations");
                let mut recommendations = mock::recommendations();
                recommendations.truncate(limit as usize);
                Ok(recommendations)
            }
        }
    }

    async fn insert_recommendation(
        &self,
        recommendation: CreateRecommendation,
    ) -> Result<AlloyRecommendation, StoreError> {
        self.inner.insert_recommendation(recommendation).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
