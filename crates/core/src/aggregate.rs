//! Derived quality aggregates over classified readings.
//!
//! Empty inputs produce zero-valued aggregates, never errors: the dashboard
//! renders a fresh system with no history as 0, not as a failure.

use serde::{Deserialize, Serialize};

use crate::tolerance::StatusBand;

/// Outcome of a recorded quality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Pass,
    Fail,
}

/// Per-band tally for a set of classified readings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandCounts {
    pub optimal: usize,
    pub acceptable: usize,
    pub critical: usize,
}

impl BandCounts {
    pub fn total(&self) -> usize {
        self.optimal + self.acceptable + self.critical
    }

    /// Readings inside their tolerance window (anything not critical).
    pub fn in_spec(&self) -> usize {
        self.optimal + self.acceptable
    }
}

/// Tally bands for a set of classified readings.
pub fn band_counts<I>(bands: I) -> BandCounts
where
    I: IntoIterator<Item = StatusBand>,
{
    let mut counts = BandCounts::default();
    for band in bands {
        match band {
            StatusBand::Optimal => counts.optimal += 1,
            StatusBand::Acceptable => counts.acceptable += 1,
            StatusBand::Critical => counts.critical += 1,
        }
    }
    counts
}

/// Overall quality score: the mean of per-band scores (100 / 85 / 60).
///
/// Empty input yields 0.0.
pub fn overall_quality<I>(bands: I) -> f64
where
    I: IntoIterator<Item = StatusBand>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for band in bands {
        sum += band.quality_score();
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Percentage of passing outcomes. Empty input yields 0.0.
pub fn pass_rate(outcomes: &[TestOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let passed = outcomes
        .iter()
        .filter(|o| **o == TestOutcome::Pass)
        .count();
    passed as f64 / outcomes.len() as f64 * 100.0
}

/// Arithmetic mean. Empty input yields 0.0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_quality_of_empty_input_is_zero() {
        assert_eq!(overall_quality(std::iter::empty()), 0.0);
    }

    #[test]
    fn overall_quality_averages_band_scores() {
        let bands = [
            StatusBand::Optimal,
            StatusBand::Acceptable,
            StatusBand::Critical,
        ];
        let score = overall_quality(bands);
        assert!((score - (100.0 + 85.0 + 60.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn all_optimal_scores_one_hundred() {
        let bands = [StatusBand::Optimal; 4];
        assert_eq!(overall_quality(bands), 100.0);
    }

    #[test]
    fn pass_rate_of_empty_input_is_zero() {
        assert_eq!(pass_rate(&[]), 0.0);
    }

    #[test]
    fn pass_rate_counts_passing_fraction() {
        // Three of four recent tests passed.
        let outcomes = [
            TestOutcome::Pass,
            TestOutcome::Pass,
            TestOutcome::Fail,
            TestOutcome::Pass,
        ];
        assert_eq!(pass_rate(&outcomes), 75.0);
    }

    #[test]
    fn band_counts_tally_each_band() {
        let counts = band_counts([
            StatusBand::Optimal,
            StatusBand::Optimal,
            StatusBand::Acceptable,
            StatusBand::Critical,
        ]);
        assert_eq!(counts.optimal, 2);
        assert_eq!(counts.acceptable, 1);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.in_spec(), 3);
    }

    #[test]
    fn mean_of_empty_input_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_averages_values() {
        assert!((mean(&[85.0, 95.0]) - 90.0).abs() < 1e-9);
    }
}
