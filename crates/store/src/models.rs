//! Wire models for the upstream process data store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use advisor_core::alert::Severity;
use advisor_core::error::CoreError;
use advisor_core::recommendation::{AdjustmentPlan, ElementAdjustment};
use advisor_core::types::Timestamp;

// ---------------------------------------------------------------------------
// Process readings (append-only)
// ---------------------------------------------------------------------------

/// A stored process reading for one furnace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReading {
    pub id: Uuid,
    pub timestamp: Timestamp,
    pub furnace_id: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Bar.
    pub pressure: f64,
    /// Normal litres per minute.
    pub oxygen_level: f64,
    /// Element symbol → percent by mass. The upstream store historically
    /// stored this under the column name `composition_data`.
    #[serde(alias = "composition_data", default)]
    pub composition: BTreeMap<String, f64>,
    #[serde(default)]
    pub quality_score: Option<f64>,
}

/// DTO for recording a new process reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProcessReading {
    pub furnace_id: String,
    /// Defaults to the time of insertion when omitted.
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    pub temperature: f64,
    pub pressure: f64,
    pub oxygen_level: f64,
    #[serde(default)]
    pub composition: BTreeMap<String, f64>,
    #[serde(default)]
    pub quality_score: Option<f64>,
}

impl CreateProcessReading {
    /// Reject readings no store backend could make sense of.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.furnace_id.trim().is_empty() {
            return Err(CoreError::Validation("furnace_id must not be empty".into()));
        }
        let finite = self.temperature.is_finite()
            && self.pressure.is_finite()
            && self.oxygen_level.is_finite()
            && self.composition.values().all(|v| v.is_finite())
            && self.quality_score.map_or(true, f64::is_finite);
        if !finite {
            return Err(CoreError::Validation(
                "reading values must be finite numbers".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// A process alert raised by monitoring or an operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    /// Originating system, e.g. a furnace id.
    pub source: String,
    pub is_resolved: bool,
    pub created_at: Timestamp,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
}

/// DTO for raising a new alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlert {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub source: String,
}

impl CreateAlert {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("alert title must not be empty".into()));
        }
        if self.message.trim().is_empty() {
            return Err(CoreError::Validation(
                "alert message must not be empty".into(),
            ));
        }
        if self.source.trim().is_empty() {
            return Err(CoreError::Validation(
                "alert source must not be empty".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recommendation records
// ---------------------------------------------------------------------------

/// A stored composition adjustment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlloyRecommendation {
    pub id: Uuid,
    pub target_composition: BTreeMap<String, f64>,
    pub current_composition: BTreeMap<String, f64>,
    pub recommendations: Vec<ElementAdjustment>,
    pub cost_impact: f64,
    pub quality_improvement: f64,
    pub created_at: Timestamp,
}

impl AlloyRecommendation {
    /// Mean confidence across this plan's element adjustments.
    pub fn mean_confidence(&self) -> f64 {
        let confidences: Vec<f64> = self.recommendations.iter().map(|r| r.confidence).collect();
        advisor_core::aggregate::mean(&confidences)
    }
}

/// DTO for persisting a new recommendation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecommendation {
    pub target_composition: BTreeMap<String, f64>,
    pub current_composition: BTreeMap<String, f64>,
    pub recommendations: Vec<ElementAdjustment>,
    pub cost_impact: f64,
    pub quality_improvement: f64,
}

impl CreateRecommendation {
    /// Package an evaluated [`AdjustmentPlan`] with the compositions it
    /// was derived from.
    pub fn from_plan(
        target: BTreeMap<String, f64>,
        current: BTreeMap<String, f64>,
        plan: AdjustmentPlan,
    ) -> Self {
        Self {
            target_composition: target,
            current_composition: current,
            recommendations: plan.adjustments,
            cost_impact: plan.cost_impact,
            quality_improvement: plan.quality_improvement,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    #[test]
    fn reading_accepts_legacy_composition_column_name() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "timestamp": Utc::now(),
            "furnace_id": "FURNACE_001",
            "temperature": 1650.0,
            "pressure": 2.5,
            "oxygen_level": 125.0,
            "composition_data": { "C": 3.5, "Si": 2.2 },
            "quality_score": 92.0
        });

        let reading: ProcessReading = serde_json::from_value(json).unwrap();
        assert_eq!(reading.composition.get("C"), Some(&3.5));
        assert_eq!(reading.composition.get("Si"), Some(&2.2));
    }

    #[test]
    fn reading_without_composition_defaults_to_empty_map() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "timestamp": Utc::now(),
            "furnace_id": "FURNACE_001",
            "temperature": 1650.0,
            "pressure": 2.5,
            "oxygen_level": 125.0
        });

        let reading: ProcessReading = serde_json::from_value(json).unwrap();
        assert!(reading.composition.is_empty());
        assert!(reading.quality_score.is_none());
    }

    #[test]
    fn create_reading_rejects_blank_furnace() {
        let create = CreateProcessReading {
            furnace_id: " ".to_string(),
            timestamp: None,
            temperature: 1650.0,
            pressure: 2.5,
            oxygen_level: 125.0,
            composition: BTreeMap::new(),
            quality_score: None,
        };
        assert_matches!(create.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_reading_rejects_non_finite_values() {
        let create = CreateProcessReading {
            furnace_id: "FURNACE_001".to_string(),
            timestamp: None,
            temperature: f64::NAN,
            pressure: 2.5,
            oxygen_level: 125.0,
            composition: BTreeMap::new(),
            quality_score: None,
        };
        assert_matches!(create.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_alert_requires_title_message_and_source() {
        let alert = CreateAlert {
            title: "Temperature Deviation".to_string(),
            message: "".to_string(),
            severity: Severity::High,
            source: "FURNACE_001".to_string(),
        };
        assert_matches!(alert.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn recommendation_mean_confidence_averages_adjustments() {
        let rec = AlloyRecommendation {
            id: Uuid::new_v4(),
            target_composition: BTreeMap::new(),
            current_composition: BTreeMap::new(),
            recommendations: vec![
                ElementAdjustment {
                    element: "C".to_string(),
                    adjustment: 0.05,
                    confidence: 94.0,
                },
                ElementAdjustment {
                    element: "Si".to_string(),
                    adjustment: 0.08,
                    confidence: 89.0,
                },
            ],
            cost_impact: 125.5,
            quality_improvement: 12.5,
            created_at: Utc::now(),
        };
        assert!((rec.mean_confidence() - 91.5).abs() < 1e-9);
    }
}
