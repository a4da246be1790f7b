//! Built-in fallback data.
//!
//! Shapes and values mirror the demo data the dashboard ships with, so the
//! UI keeps rendering recognisable numbers when the upstream store is
//! unreachable.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use advisor_core::alert::Severity;
use advisor_core::recommendation::ElementAdjustment;

use crate::models::{Alert, AlloyRecommendation, ProcessReading};

/// Furnace id used by all mock readings.
pub const MOCK_FURNACE_ID: &str = "FURNACE_001";

/// Number of readings in the fallback series.
pub const MOCK_READING_COUNT: usize = 20;

/// Spacing between consecutive mock readings.
const READING_SPACING_MINUTES: i64 = 5;

fn jitter<R: Rng + ?Sized>(rng: &mut R, center: f64, amplitude: f64) -> f64 {
    center + rng.random_range(-amplitude..amplitude)
}

/// A 20-reading history for [`MOCK_FURNACE_ID`], newest first at 5-minute
/// spacing, jittered around typical cast-iron melt values.
pub fn process_readings() -> Vec<ProcessReading> {
    let mut rng = rand::rng();
    let now = Utc::now();

    (0..MOCK_READING_COUNT)
        .map(|i| ProcessReading {
            id: Uuid::new_v4(),
            timestamp: now - Duration::minutes(READING_SPACING_MINUTES * i as i64),
            furnace_id: MOCK_FURNACE_ID.to_string(),
            temperature: jitter(&mut rng, 1650.0, 10.0),
            pressure: jitter(&mut rng, 2.5, 0.25),
            oxygen_level: jitter(&mut rng, 125.0, 5.0),
            composition: BTreeMap::from([
                ("C".to_string(), jitter(&mut rng, 3.5, 0.1)),
                ("Si".to_string(), jitter(&mut rng, 2.2, 0.15)),
                ("Mn".to_string(), jitter(&mut rng, 0.7, 0.05)),
                ("Cr".to_string(), jitter(&mut rng, 0.2, 0.025)),
            ]),
            quality_score: Some(rng.random_range(85.0..100.0)),
        })
        .collect()
}

/// The two standing demo alerts.
pub fn alerts() -> Vec<Alert> {
    let now = Utc::now();
    vec![
        Alert {
            id: Uuid::new_v4(),
            title: "Temperature Deviation".to_string(),
            message: "Furnace temperature has exceeded normal range".to_string(),
            severity: Severity::High,
            source: MOCK_FURNACE_ID.to_string(),
            is_resolved: false,
            created_at: now - Duration::minutes(5),
            resolved_at: None,
        },
        Alert {
            id: Uuid::new_v4(),
            title: "Low Inventory Warning".to_string(),
            message: "Silicon carbide inventory below threshold".to_string(),
            severity: Severity::Medium,
            source: "INVENTORY_SYSTEM".to_string(),
            is_resolved: false,
            created_at: now - Duration::minutes(15),
            resolved_at: None,
        },
    ]
}

/// One demo recommendation record.
pub fn recommendations() -> Vec<AlloyRecommendation> {
    let adjustment = |element: &str, adjustment: f64, confidence: f64| ElementAdjustment {
        element: element.to_string(),
        adjustment,
        confidence,
    };

    vec![AlloyRecommendation {
        id: Uuid::new_v4(),
        target_composition: BTreeMap::from([
            ("C".to_string(), 3.5),
            ("Si".to_string(), 2.2),
            ("Mn".to_string(), 0.7),
            ("Cr".to_string(), 0.2),
        ]),
        current_composition: BTreeMap::from([
            ("C".to_string(), 3.45),
            ("Si".to_string(), 2.12),
            ("Mn".to_string(), 0.68),
            ("Cr".to_string(), 0.18),
        ]),
        recommendations: vec![
            adjustment("C", 0.05, 94.0),
            adjustment("Si", 0.08, 89.0),
            adjustment("Mn", 0.02, 92.0),
            adjustment("Cr", 0.02, 87.0),
        ],
        cost_impact: 125.50,
        quality_improvement: 12.5,
        created_at: Utc::now() - Duration::minutes(10),
    }]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
