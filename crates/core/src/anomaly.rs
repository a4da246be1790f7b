//! Statistical anomaly detection over recent process readings.
//!
//! Pure logic. The caller fetches readings and passes the temperature
//! series in, oldest first.

use serde::Serialize;

use crate::aggregate;
use crate::alert::Severity;
use crate::types::Timestamp;

/// Minimum series length before screening is meaningful.
pub const MIN_SAMPLES: usize = 10;

/// How many of the newest samples are screened against the series statistics.
pub const RECENT_WINDOW: usize = 5;

/// One temperature sample for anomaly screening.
#[derive(Debug, Clone)]
pub struct TemperatureSample {
    pub furnace_id: String,
    pub timestamp: Timestamp,
    pub temperature: f64,
}

/// A statistically unusual temperature reading.
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub furnace_id: String,
    pub timestamp: Timestamp,
    pub value: f64,
    /// Two-sigma band around the series mean.
    pub expected_range: (f64, f64),
    pub severity: Severity,
}

/// Screen the newest [`RECENT_WINDOW`] samples against the whole series
/// using the three-sigma rule.
///
/// Deviations beyond three standard deviations are flagged; beyond four
/// they are high severity. Fewer than [`MIN_SAMPLES`] samples yields an
/// empty result, never an error.
pub fn detect_temperature_anomalies(samples: &[TemperatureSample]) -> Vec<Anomaly> {
    if samples.len() < MIN_SAMPLES {
        return Vec::new();
    }

    let temperatures: Vec<f64> = samples.iter().map(|s| s.temperature).collect();
    let mean = aggregate::mean(&temperatures);
    let sigma = population_std(&temperatures, mean);

    let recent_start = samples.len() - RECENT_WINDOW;
    let mut anomalies = Vec::new();

    for sample in &samples[recent_start..] {
        let deviation = (sample.temperature - mean).abs();
        if deviation > 3.0 * sigma {
            anomalies.push(Anomaly {
                kind: "temperature_anomaly",
                furnace_id: sample.furnace_id.clone(),
                timestamp: sample.timestamp,
                value: sample.temperature,
                expected_range: (mean - 2.0 * sigma, mean + 2.0 * sigma),
                severity: if deviation > 4.0 * sigma {
                    Severity::High
                } else {
                    Severity::Medium
                },
            });
        }
    }

    anomalies
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
