//! Snapshot types emitted by the live simulator.

use advisor_core::aggregate::{band_counts, overall_quality, BandCounts};
use advisor_core::tolerance::{BandTaxonomy, StatusBand};
use advisor_core::types::Timestamp;
use serde::{Deserialize, Serialize};

/// One metric's state at snapshot time, with its evaluated band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricState {
    pub name: String,
    pub unit: String,
    pub current: f64,
    pub target: f64,
    pub tolerance: f64,
    pub band: StatusBand,
    /// Display label for the band under the feed's taxonomy.
    pub status: String,
    /// Position of `current` within the tolerance window, in `[0, 1]`.
    pub position: f64,
}

impl MetricState {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        current: f64,
        target: f64,
        tolerance: f64,
        band: StatusBand,
        taxonomy: BandTaxonomy,
        position: f64,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            current,
            target,
            tolerance,
            band,
            status: band.label(taxonomy).to_string(),
            position,
        }
    }
}

/// A full set of metric states for one feed at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub feed: String,
    /// Monotonically increasing per-simulator sequence number, starting at 1.
    pub seq: u64,
    pub captured_at: Timestamp,
    pub metrics: Vec<MetricState>,
}

impl MetricsSnapshot {
    /// Band tallies across every metric in the snapshot.
    pub fn counts(&self) -> BandCounts {
        band_counts(self.metrics.iter().map(|m| m.band))
    }

    /// Mean band score across every metric, 0.0 when empty.
    pub fn quality(&self) -> f64 {
        overall_quality(self.metrics.iter().map(|m| m.band))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
