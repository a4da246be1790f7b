//! Pure domain logic for the alloy process advisor.
//!
//! No I/O and no async: callers fetch readings from the store (or the live
//! simulator) and pass them in. The api crate composes these building blocks
//! over the store, sim, and events crates.

pub mod aggregate;
pub mod alert;
pub mod anomaly;
pub mod composition;
pub mod error;
pub mod optimizer;
pub mod reading;
pub mod recommendation;
pub mod tolerance;
pub mod types;

pub use error::CoreError;
pub use reading::MetricReading;
pub use tolerance::{BandTaxonomy, BandThresholds, Evaluation, StatusBand, ToleranceEvaluator};
