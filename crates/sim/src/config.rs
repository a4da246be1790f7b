//! Simulator configuration.

use std::time::Duration;

use advisor_core::error::CoreError;
use advisor_core::reading::MetricReading;
use advisor_core::tolerance::{BandTaxonomy, BandThresholds};

/// One simulated metric: its reading plus per-metric noise and clamps.
#[derive(Debug, Clone)]
pub struct MetricSpec {
    pub reading: MetricReading,
    /// Overrides the feed-level amplitude when set.
    pub noise_amplitude: Option<f64>,
    pub clamp_min: Option<f64>,
    pub clamp_max: Option<f64>,
}

impl MetricSpec {
    pub fn new(reading: MetricReading) -> Self {
        Self {
            reading,
            noise_amplitude: None,
            clamp_min: None,
            clamp_max: None,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.noise_amplitude = Some(amplitude);
        self
    }

    pub fn with_clamp(mut self, min: f64, max: f64) -> Self {
        self.clamp_min = Some(min);
        self.clamp_max = Some(max);
        self
    }

    pub fn with_clamp_min(mut self, min: f64) -> Self {
        self.clamp_min = Some(min);
        self
    }

    fn validate(&self) -> Result<(), CoreError> {
        self.reading.validate()?;
        if let Some(amplitude) = self.noise_amplitude {
            validate_amplitude(&self.reading.name, amplitude)?;
        }
        match (self.clamp_min, self.clamp_max) {
            (Some(min), _) | (_, Some(min)) if !min.is_finite() => {
                return Err(CoreError::Validation(format!(
                    "metric '{}' has a non-finite clamp bound",
                    self.reading.name
                )));
            }
            (Some(min), Some(max)) if min > max => {
                return Err(CoreError::Validation(format!(
                    "metric '{}' clamp_min exceeds clamp_max",
                    self.reading.name
                )));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Configuration for one simulated feed.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Feed name carried into every snapshot, e.g. `"spectrometer"`.
    pub feed: String,
    /// Time between snapshot emissions.
    pub interval: Duration,
    /// Feed-level noise amplitude, used where a metric has no override.
    pub noise_amplitude: f64,
    pub thresholds: BandThresholds,
    pub taxonomy: BandTaxonomy,
    pub metrics: Vec<MetricSpec>,
}

impl SimulatorConfig {
    /// Reject configurations the simulator could not run safely.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.feed.trim().is_empty() {
            return Err(CoreError::Validation("feed name must not be empty".into()));
        }
        if self.interval.is_zero() {
            return Err(CoreError::Validation(
                "simulation interval must be positive".into(),
            ));
        }
        validate_amplitude(&self.feed, self.noise_amplitude)?;
        self.thresholds.validate()?;
        if self.metrics.is_empty() {
            return Err(CoreError::Validation(format!(
                "feed '{}' has no metrics to simulate",
                self.feed
            )));
        }
        for metric in &self.metrics {
            metric.validate()?;
        }
        Ok(())
    }
}

fn validate_amplitude(name: &str, amplitude: f64) -> Result<(), CoreError> {
    if !amplitude.is_finite() || amplitude < 0.0 {
        return Err(CoreError::Validation(format!(
            "'{name}' noise amplitude must be finite and non-negative"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
