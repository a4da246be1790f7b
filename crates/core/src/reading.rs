//! Metric reading primitives shared by the evaluator and the simulator.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named quantity with its setpoint and symmetric tolerance half-width.
///
/// `target - tolerance ..= target + tolerance` is the acceptable window;
/// the evaluator classifies `current` relative to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub name: String,
    pub current: f64,
    pub target: f64,
    /// Symmetric half-width of the acceptable window around `target`.
    pub tolerance: f64,
    #[serde(default)]
    pub unit: String,
}

impl MetricReading {
    pub fn new(
        name: impl Into<String>,
        current: f64,
        target: f64,
        tolerance: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current,
            target,
            tolerance,
            unit: unit.into(),
        }
    }

    /// Reject unnamed metrics, non-finite numbers, and negative tolerances.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("metric name must not be empty".into()));
        }
        if !self.current.is_finite() || !self.target.is_finite() || !self.tolerance.is_finite() {
            return Err(CoreError::Validation(format!(
                "metric '{}' has a non-finite value",
                self.name
            )));
        }
        if self.tolerance < 0.0 {
            return Err(CoreError::Validation(format!(
                "metric '{}' has a negative tolerance",
                self.name
            )));
        }
        Ok(())
    }

    /// Absolute distance of `current` from the setpoint.
    pub fn deviation(&self) -> f64 {
        (self.current - self.target).abs()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
