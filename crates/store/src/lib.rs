//! External data-store collaborator for the advisor.
//!
//! Persistence lives in an upstream REST service; this crate wraps it behind
//! the [`ProcessStore`] trait. The dashboard must keep rendering when that
//! service is unreachable, so reads are wrapped by
//! [`fallback::FallbackStore`], which substitutes built-in mock data on
//! failure. Write failures propagate to the caller, which logs them and
//! moves on.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

pub mod client;
pub mod error;
pub mod fallback;
pub mod memory;
pub mod mock;
pub mod models;

pub use client::RestStore;
pub use error::StoreError;
pub use fallback::FallbackStore;
pub use memory::InMemoryStore;
pub use models::{
    Alert, AlloyRecommendation, CreateAlert, CreateProcessReading, CreateRecommendation,
    ProcessReading,
};

/// Shared handle to a process store implementation.
pub type SharedStore = Arc<dyn ProcessStore>;

/// Access to the upstream process data: readings, alerts, and
/// recommendation records.
///
/// All list results are ordered newest first.
#[async_trait]
pub trait ProcessStore: Send + Sync {
    /// Readings recorded within the last `hours` hours.
    async fn recent_readings(&self, hours: u32) -> Result<Vec<ProcessReading>, StoreError>;

    /// All readings for one furnace, capped at 100 rows.
    async fn readings_by_furnace(
        &self,
        furnace_id: &str,
    ) -> Result<Vec<ProcessReading>, StoreError>;

    /// Record a new reading and return the stored row.
    async fn insert_reading(
        &self,
        reading: CreateProcessReading,
    ) -> Result<ProcessReading, StoreError>;

    /// Alerts that have not been resolved yet.
    async fn active_alerts(&self) -> Result<Vec<Alert>, StoreError>;

    /// Raise a new alert and return the stored row.
    async fn create_alert(&self, alert: CreateAlert) -> Result<Alert, StoreError>;

    /// Mark an alert resolved and return the updated row.
    async fn resolve_alert(&self, id: Uuid) -> Result<Alert, StoreError>;

    /// The most recent recommendation records, newest first.
    async fn recent_recommendations(
        &self,
        limit: u32,
    ) -> Result<Vec<AlloyRecommendation>, StoreError>;

    /// Persist a recommendation record and return the stored row.
    async fn insert_recommendation(
        &self,
        recommendation: CreateRecommendation,
    ) -> Result<AlloyRecommendation, StoreError>;
}
