//! REST client for the upstream process data store.
//!
//! Wraps the store's HTTP API (process readings, alerts, recommendation
//! records) using [`reqwest`]. Callers normally wrap this in a
//! [`FallbackStore`](crate::fallback::FallbackStore) so read failures
//! degrade to mock data instead of surfacing.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Alert, AlloyRecommendation, CreateAlert, CreateProcessReading, CreateRecommendation,
    ProcessReading,
};
use crate::ProcessStore;

/// Default base URL of the store API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// HTTP client for the process data store.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// Create a new client with its own connection pool.
    ///
    /// * `base_url` - Base API URL, e.g. `http://localhost:8000/api`.
    /// * `timeout`  - Per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or [`StoreError::Status`] with the status and
    /// body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                StoreError::Decode(e.to_string())
            } else {
                StoreError::Transport(e)
            }
        })
    }
}

#[async_trait]
impl ProcessStore for RestStore {
    async fn recent_readings(&self, hours: u32) -> Result<Vec<ProcessReading>, StoreError> {
        let response = self
            .client
            .get(self.url("process-data/recent/"))
            .query(&[("hours", hours)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn readings_by_furnace(
        &self,
        furnace_id: &str,
    ) -> Result<Vec<ProcessReading>, StoreError> {
        let response = self
            .client
            .get(self.url("process-data/by_furnace/"))
            .query(&[("furnace_id", furnace_id)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn insert_reading(
        &self,
        reading: CreateProcessReading,
    ) -> Result<ProcessReading, StoreError> {
        let response = self
            .client
            .post(self.url("process-data/"))
            .json(&reading)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn active_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        let response = self.client.get(self.url("alerts/active/")).send().await?;
        Self::parse_response(response).await
    }

    async fn create_alert(&self, alert: CreateAlert) -> Result<Alert, StoreError> {
        let response = self
            .client
            .post(self.url("alerts/"))
            .json(&alert)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn resolve_alert(&self, id: Uuid) -> Result<Alert, StoreError> {
        let response = self
            .client
            .post(self.url(&format!("alerts/{id}/resolve/")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn recent_recommendations(
        &self,
        limit: u32,
    ) -> Result<Vec<AlloyRecommendation>, StoreError> {
        let response = self
            .client
            .get(self.url("recommendations/"))
            .query(&[("limit", limit)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn insert_recommendation(
        &self,
        recommendation: CreateRecommendation,
    ) -> Result<AlloyRecommendation, StoreError> {
        let response = self
            .client
            .post(self.url("recommendations/"))
            .json(&recommendation)
            .send()
            .await?;
        Self::parse_response(response).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
