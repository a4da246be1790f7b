//! Composition-based quality scoring against alloy grade specifications.

use std::collections::BTreeMap;

/// Allowed window for one element of a grade, percent by mass.
#[derive(Debug, Clone, Copy)]
pub struct ElementRange {
    pub element: &'static str,
    pub min: f64,
    pub max: f64,
}

const fn range(element: &'static str, min: f64, max: f64) -> ElementRange {
    ElementRange { element, min, max }
}

/// 316L stainless: molybdenum-bearing, low carbon.
pub const GRADE_316L: &[ElementRange] = &[
    range("Fe", 65.0, 72.0),
    range("Cr", 16.0, 18.0),
    range("Ni", 10.0, 14.0),
    range("Mo", 2.0, 3.0),
    range("Mn", 0.0, 2.0),
    range("Si", 0.0, 1.0),
];

/// 304 stainless: the general-purpose 18/8 grade.
pub const GRADE_304: &[ElementRange] = &[
    range("Fe", 66.0, 74.0),
    range("Cr", 18.0, 20.0),
    range("Ni", 8.0, 10.5),
    range("Mn", 0.0, 2.0),
    range("Si", 0.0, 1.0),
    range("C", 0.0, 0.08),
];

/// Score reported when the grade is unknown or nothing can be checked.
pub const DEFAULT_SCORE: f64 = 85.0;

/// Look up the element windows for a grade name.
pub fn grade_spec(grade: &str) -> Option<&'static [ElementRange]> {
    match grade {
        "316L" => Some(GRADE_316L),
        "304" => Some(GRADE_304),
        _ => None,
    }
}

/// Score a measured composition against a grade's element windows.
///
/// Each window element present in the composition contributes 100 when
/// inside its window, otherwise 100 minus a penalty proportional to the
/// relative deviation from the window centre (floor 50). The result is the
/// mean over checked elements; with nothing checkable the [`DEFAULT_SCORE`]
/// applies.
pub fn quality_score(composition: &BTreeMap<String, f64>, grade: &str) -> f64 {
    let Some(spec) = grade_spec(grade) else {
        return DEFAULT_SCORE;
    };

    let mut total = 0.0;
    let mut checked = 0usize;

    for element_range in spec {
        let Some(&value) = composition.get(element_range.element) else {
            continue;
        };
        if value >= element_range.min && value <= element_range.max {
            total += 100.0;
        } else {
            let center = (element_range.min + element_range.max) / 2.0;
            let deviation = (value - center).abs() / center;
            let penalty = (deviation * 100.0).min(50.0);
            total += (100.0 - penalty).max(50.0);
        }
        checked += 1;
    }

    if checked == 0 {
        return DEFAULT_SCORE;
    }
    total / checked as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
