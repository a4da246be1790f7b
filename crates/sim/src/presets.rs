//! Built-in feed presets.
//!
//! One preset per live dashboard view, each carrying the view's metric
//! table, update cadence, band cutoffs and display vocabulary.

use std::time::Duration;

use advisor_core::reading::MetricReading;
use advisor_core::tolerance::{BandTaxonomy, BandThresholds};
use serde::{Deserialize, Serialize};

use crate::config::{MetricSpec, SimulatorConfig};

/// The live feeds a client can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    Spectrometer,
    Furnace,
    Quality,
    Operations,
}

impl Feed {
    pub const ALL: [Feed; 4] = [
        Feed::Spectrometer,
        Feed::Furnace,
        Feed::Quality,
        Feed::Operations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Feed::Spectrometer => "spectrometer",
            Feed::Furnace => "furnace",
            Feed::Quality => "quality",
            Feed::Operations => "operations",
        }
    }

    pub fn from_name(name: &str) -> Option<Feed> {
        Feed::ALL
            .into_iter()
            .find(|feed| feed.as_str().eq_ignore_ascii_case(name.trim()))
    }

    pub fn description(self) -> &'static str {
        match self {
            Feed::Spectrometer => "Elemental composition from the optical emission spectrometer",
            Feed::Furnace => "Furnace zone temperatures, power draw and gas flows",
            Feed::Quality => "Mechanical and dimensional quality control tests",
            Feed::Operations => "Plant-wide operations KPIs",
        }
    }

    /// The preset simulator configuration for this feed.
    pub fn config(self) -> SimulatorConfig {
        match self {
            Feed::Spectrometer => spectrometer(),
            Feed::Furnace => furnace(),
            Feed::Quality => quality(),
            Feed::Operations => operations(),
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn element(symbol: &str, current: f64, target: f64, tolerance: f64) -> MetricSpec {
    MetricSpec::new(MetricReading::new(symbol, current, target, tolerance, "%"))
}

fn zone(name: &str, current: f64, target: f64, tolerance: f64) -> MetricSpec {
    MetricSpec::new(MetricReading::new(name, current, target, tolerance, "°C"))
}

fn spectrometer() -> SimulatorConfig {
    SimulatorConfig {
        feed: Feed::Spectrometer.as_str().to_string(),
        interval: Duration::from_secs(3),
        noise_amplitude: 0.01,
        thresholds: BandThresholds::default(),
        taxonomy: BandTaxonomy::Composition,
        metrics: vec![
            element("C", 3.45, 3.50, 0.10),
            element("Si", 2.12, 2.20, 0.15),
            element("Mn", 0.68, 0.70, 0.05),
            element("P", 0.035, 0.040, 0.010),
            element("S", 0.025, 0.030, 0.010),
            element("Cr", 0.18, 0.20, 0.05),
        ],
    }
}

fn furnace() -> SimulatorConfig {
    SimulatorConfig {
        feed: Feed::Furnace.as_str().to_string(),
        interval: Duration::from_secs(5),
        noise_amplitude: 5.0,
        thresholds: BandThresholds::relaxed(),
        taxonomy: BandTaxonomy::Process,
        metrics: vec![
            zone("Arc Zone", 1650.0, 1650.0, 25.0),
            zone("Ladle Zone", 1580.0, 1590.0, 20.0),
            zone("Tapping Zone", 1620.0, 1615.0, 15.0),
            zone("Slag Zone", 1480.0, 1500.0, 30.0),
            // Setpoints for power and gas come from the furnace operating
            // ranges; only the zones have explicit tolerances upstream.
            MetricSpec::new(MetricReading::new("Power Draw", 45.8, 46.0, 6.0, "MW"))
                .with_amplitude(1.0),
            MetricSpec::new(MetricReading::new("Energy Efficiency", 87.4, 90.0, 10.0, "%"))
                .with_amplitude(0.5)
                .with_clamp(80.0, 95.0),
            MetricSpec::new(MetricReading::new("Oxygen Flow", 125.6, 125.0, 25.0, "L/min"))
                .with_amplitude(2.5),
            MetricSpec::new(MetricReading::new("Argon Flow", 45.2, 45.0, 15.0, "L/min"))
                .with_amplitude(1.0),
            MetricSpec::new(MetricReading::new("Nitrogen Flow", 18.9, 19.0, 6.0, "L/min"))
                .with_amplitude(0.5),
        ],
    }
}

fn quality() -> SimulatorConfig {
    SimulatorConfig {
        feed: Feed::Quality.as_str().to_string(),
        interval: Duration::from_secs(8),
        noise_amplitude: 0.05,
        thresholds: BandThresholds::relaxed(),
        taxonomy: BandTaxonomy::PassFail,
        metrics: vec![
            MetricSpec::new(MetricReading::new("Carbon Content", 0.42, 0.40, 0.05, "%")),
            MetricSpec::new(MetricReading::new(
                "Tensile Strength",
                485.0,
                500.0,
                25.0,
                "MPa",
            )),
            MetricSpec::new(MetricReading::new("Hardness (HRC)", 22.0, 20.0, 3.0, "HRC")),
            MetricSpec::new(MetricReading::new("Surface Finish", 1.2, 1.0, 0.3, "μm")),
            MetricSpec::new(MetricReading::new(
                "Dimensional Accuracy",
                0.02,
                0.01,
                0.02,
                "mm",
            )),
        ],
    }
}

fn operations() -> SimulatorConfig {
    SimulatorConfig {
        feed: Feed::Operations.as_str().to_string(),
        interval: Duration::from_secs(3),
        noise_amplitude: 0.1,
        thresholds: BandThresholds::relaxed(),
        taxonomy: BandTaxonomy::Process,
        metrics: vec![
            MetricSpec::new(MetricReading::new("Global Efficiency", 91.2, 91.5, 6.5, "%"))
                .with_amplitude(0.25)
                .with_clamp(85.0, 98.0),
            MetricSpec::new(MetricReading::new("Furnaces Online", 47.0, 47.5, 7.5, ""))
                .with_amplitude(1.0)
                .with_clamp(40.0, 55.0),
            MetricSpec::new(MetricReading::new(
                "Total Production",
                12847.0,
                12847.0,
                3000.0,
                "Units/Hour",
            ))
            .with_amplitude(50.0)
            .with_clamp_min(10000.0),
            MetricSpec::new(MetricReading::new("Quality Score", 94.8, 94.5, 4.5, "%"))
                .with_amplitude(0.15)
                .with_clamp(90.0, 99.0),
            MetricSpec::new(MetricReading::new("Data Transfer", 2.4, 3.0, 2.0, "GB/s"))
                .with_amplitude(0.1)
                .with_clamp(1.0, 5.0),
            MetricSpec::new(MetricReading::new("System Uptime", 99.97, 99.75, 0.25, "%"))
                .with_amplitude(0.005)
                .with_clamp(99.5, 100.0),
        ],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
