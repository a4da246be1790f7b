//! Tolerance band classification.
//!
//! Pure logic, no I/O. Every view of the dashboard (composition, furnace
//! zones, quality control, operations KPIs) ranks readings with the same
//! rule: deviation from target as a fraction of the tolerance half-width.
//! The views differ only in their cutoff ratios and display vocabulary,
//! both of which are parameters here.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::reading::MetricReading;

/// Band cutoffs as fractions of a reading's tolerance.
///
/// A reading whose deviation-to-tolerance ratio is at most `best_max_ratio`
/// lands in [`StatusBand::Optimal`], at most `middle_max_ratio` in
/// [`StatusBand::Acceptable`], and anything beyond in
/// [`StatusBand::Critical`]. Boundary values belong to the better band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub best_max_ratio: f64,
    pub middle_max_ratio: f64,
}

impl Default for BandThresholds {
    /// Strict cutoffs used for composition monitoring: half the tolerance
    /// window is optimal, the full window acceptable.
    fn default() -> Self {
        Self {
            best_max_ratio: 0.5,
            middle_max_ratio: 1.0,
        }
    }
}

impl BandThresholds {
    /// Relaxed cutoffs used by the process and quality views (0.7 / 1.0).
    pub fn relaxed() -> Self {
        Self {
            best_max_ratio: 0.7,
            middle_max_ratio: 1.0,
        }
    }

    /// Reject cutoffs that cannot order the three bands.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.best_max_ratio.is_finite() || !self.middle_max_ratio.is_finite() {
            return Err(CoreError::Validation(
                "band thresholds must be finite".into(),
            ));
        }
        if self.best_max_ratio <= 0.0 {
            return Err(CoreError::Validation(
                "best_max_ratio must be positive".into(),
            ));
        }
        if self.middle_max_ratio < self.best_max_ratio {
            return Err(CoreError::Validation(
                "middle_max_ratio must not be below best_max_ratio".into(),
            ));
        }
        Ok(())
    }
}

/// Classification of a reading relative to its tolerance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBand {
    Optimal,
    Acceptable,
    Critical,
}

impl StatusBand {
    /// Score contribution used by the quality aggregates.
    pub fn quality_score(self) -> f64 {
        match self {
            StatusBand::Optimal => 100.0,
            StatusBand::Acceptable => 85.0,
            StatusBand::Critical => 60.0,
        }
    }

    /// Render the band in a view taxonomy's vocabulary.
    pub fn label(self, taxonomy: BandTaxonomy) -> &'static str {
        match (taxonomy, self) {
            (BandTaxonomy::Composition, StatusBand::Optimal) => "optimal",
            (BandTaxonomy::Composition, StatusBand::Acceptable) => "acceptable",
            (BandTaxonomy::Composition, StatusBand::Critical) => "critical",
            (BandTaxonomy::Process, StatusBand::Optimal) => "optimal",
            (BandTaxonomy::Process, StatusBand::Acceptable) => "warning",
            (BandTaxonomy::Process, StatusBand::Critical) => "critical",
            (BandTaxonomy::PassFail, StatusBand::Optimal) => "pass",
            (BandTaxonomy::PassFail, StatusBand::Acceptable) => "warning",
            (BandTaxonomy::PassFail, StatusBand::Critical) => "fail",
        }
    }
}

/// Display vocabulary for bands, per dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandTaxonomy {
    /// optimal / acceptable / critical (spectrometer composition view).
    Composition,
    /// optimal / warning / critical (furnace and operations views).
    Process,
    /// pass / warning / fail (quality control view).
    PassFail,
}

/// Result of evaluating one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub band: StatusBand,
    /// Where `current` sits inside `[target - tolerance, target + tolerance]`,
    /// clamped to `[0, 1]`. 0.5 is dead on target.
    pub position: f64,
}

/// Classifies readings against their tolerance windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToleranceEvaluator {
    thresholds: BandThresholds,
}

impl ToleranceEvaluator {
    pub fn new(thresholds: BandThresholds) -> Result<Self, CoreError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> BandThresholds {
        self.thresholds
    }

    /// Classify one reading.
    ///
    /// A zero tolerance is a degenerate exact-match window, not an error:
    /// `current == target` is optimal (position 0.5), anything else is
    /// critical (position 0.0 below target, 1.0 above).
    pub fn evaluate(&self, reading: &MetricReading) -> Result<Evaluation, CoreError> {
        reading.validate()?;

        if reading.tolerance == 0.0 {
            let band = if reading.current == reading.target {
                StatusBand::Optimal
            } else {
                StatusBand::Critical
            };
            return Ok(Evaluation {
                band,
                position: normalized_position(reading),
            });
        }

        let ratio = reading.deviation() / reading.tolerance;
        let band = if ratio <= self.thresholds.best_max_ratio {
            StatusBand::Optimal
        } else if ratio <= self.thresholds.middle_max_ratio {
            StatusBand::Acceptable
        } else {
            StatusBand::Critical
        };

        Ok(Evaluation {
            band,
            position: normalized_position(reading),
        })
    }

    /// Classify a batch, failing on the first invalid reading.
    pub fn evaluate_all(&self, readings: &[MetricReading]) -> Result<Vec<Evaluation>, CoreError> {
        readings.iter().map(|r| self.evaluate(r)).collect()
    }
}

/// Position of `current` inside the tolerance window, clamped to `[0, 1]`.
pub fn normalized_position(reading: &MetricReading) -> f64 {
    let span = 2.0 * reading.tolerance;
    if span == 0.0 {
        return if reading.current < reading.target {
            0.0
        } else if reading.current > reading.target {
            1.0
        } else {
            0.5
        };
    }
    ((reading.current - (reading.target - reading.tolerance)) / span).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    const EPS: f64 = 1e-9;

    fn reading(current: f64, target: f64, tolerance: f64) -> MetricReading {
        MetricReading::new("m", current, target, tolerance, "")
    }

    #[test]
    fn carbon_reading_is_optimal_at_quarter_position() {
        let eval = ToleranceEvaluator::default()
            .evaluate(&reading(3.45, 3.50, 0.10))
            .unwrap();
        assert_eq!(eval.band, StatusBand::Optimal);
        assert!((eval.position - 0.25).abs() < EPS);
    }

    #[test]
    fn tensile_reading_is_acceptable_at_fifth_position() {
        let eval = ToleranceEvaluator::default()
            .evaluate(&reading(485.0, 500.0, 25.0))
            .unwrap();
        assert_eq!(eval.band, StatusBand::Acceptable);
        assert!((eval.position - 0.20).abs() < EPS);
    }

    #[test]
    fn carbon_content_passes_under_relaxed_cutoffs() {
        let evaluator = ToleranceEvaluator::new(BandThresholds::relaxed()).unwrap();
        let eval = evaluator.evaluate(&reading(0.42, 0.40, 0.05)).unwrap();
        assert_eq!(eval.band, StatusBand::Optimal);
    }

    #[test]
    fn boundary_ratios_belong_to_the_better_band() {
        let evaluator = ToleranceEvaluator::default();

        // Exactly half the tolerance: still optimal.
        let at_best = evaluator.evaluate(&reading(10.5, 10.0, 1.0)).unwrap();
        assert_eq!(at_best.band, StatusBand::Optimal);

        // Exactly the full tolerance: still acceptable.
        let at_middle = evaluator.evaluate(&reading(11.0, 10.0, 1.0)).unwrap();
        assert_eq!(at_middle.band, StatusBand::Acceptable);

        // Just beyond: critical.
        let beyond = evaluator.evaluate(&reading(11.001, 10.0, 1.0)).unwrap();
        assert_eq!(beyond.band, StatusBand::Critical);
    }

    #[test]
    fn relaxed_cutoffs_widen_the_optimal_band() {
        let strict = ToleranceEvaluator::default();
        let relaxed = ToleranceEvaluator::new(BandThresholds::relaxed()).unwrap();
        let r = reading(10.6, 10.0, 1.0); // ratio 0.6

        assert_eq!(strict.evaluate(&r).unwrap().band, StatusBand::Acceptable);
        assert_eq!(relaxed.evaluate(&r).unwrap().band, StatusBand::Optimal);
    }

    #[test]
    fn position_is_clamped_to_unit_interval() {
        let evaluator = ToleranceEvaluator::default();

        let far_below = evaluator.evaluate(&reading(0.0, 100.0, 5.0)).unwrap();
        assert_eq!(far_below.position, 0.0);
        assert_eq!(far_below.band, StatusBand::Critical);

        let far_above = evaluator.evaluate(&reading(200.0, 100.0, 5.0)).unwrap();
        assert_eq!(far_above.position, 1.0);
    }

    #[test]
    fn on_target_reading_sits_at_center() {
        let eval = ToleranceEvaluator::default()
            .evaluate(&reading(100.0, 100.0, 5.0))
            .unwrap();
        assert_eq!(eval.band, StatusBand::Optimal);
        assert!((eval.position - 0.5).abs() < EPS);
    }

    #[test]
    fn zero_tolerance_is_exact_match_or_critical() {
        let evaluator = ToleranceEvaluator::default();

        let exact = evaluator.evaluate(&reading(42.0, 42.0, 0.0)).unwrap();
        assert_eq!(exact.band, StatusBand::Optimal);
        assert!((exact.position - 0.5).abs() < EPS);

        let below = evaluator.evaluate(&reading(41.9, 42.0, 0.0)).unwrap();
        assert_eq!(below.band, StatusBand::Critical);
        assert_eq!(below.position, 0.0);

        let above = evaluator.evaluate(&reading(42.1, 42.0, 0.0)).unwrap();
        assert_eq!(above.band, StatusBand::Critical);
        assert_eq!(above.position, 1.0);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let result = ToleranceEvaluator::default().evaluate(&reading(1.0, 1.0, -0.5));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        let zero_best = BandThresholds {
            best_max_ratio: 0.0,
            middle_max_ratio: 1.0,
        };
        assert_matches!(
            ToleranceEvaluator::new(zero_best),
            Err(CoreError::Validation(_))
        );

        let inverted = BandThresholds {
            best_max_ratio: 0.8,
            middle_max_ratio: 0.5,
        };
        assert_matches!(
            ToleranceEvaluator::new(inverted),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn evaluate_all_fails_on_first_invalid_reading() {
        let evaluator = ToleranceEvaluator::default();
        let readings = vec![reading(1.0, 1.0, 0.5), reading(1.0, 1.0, -1.0)];
        assert_matches!(
            evaluator.evaluate_all(&readings),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn labels_follow_the_view_taxonomy() {
        assert_eq!(
            StatusBand::Acceptable.label(BandTaxonomy::Composition),
            "acceptable"
        );
        assert_eq!(
            StatusBand::Acceptable.label(BandTaxonomy::Process),
            "warning"
        );
        assert_eq!(StatusBand::Optimal.label(BandTaxonomy::PassFail), "pass");
        assert_eq!(StatusBand::Critical.label(BandTaxonomy::PassFail), "fail");
    }

    #[test]
    fn band_scores_match_quality_weights() {
        assert_eq!(StatusBand::Optimal.quality_score(), 100.0);
        assert_eq!(StatusBand::Acceptable.quality_score(), 85.0);
        assert_eq!(StatusBand::Critical.quality_score(), 60.0);
    }
}
