//! Seeding feed presets from stored readings.

use advisor_store::ProcessStore;

use crate::config::SimulatorConfig;
use crate::presets::Feed;

/// Hours of history consulted when seeding.
const SEED_WINDOW_HOURS: u32 = 24;

/// The feed's preset config, with starting values taken from the most
/// recent stored reading where one exists.
///
/// Spectrometer metrics seed from the reading's composition map, the
/// furnace arc zone from its temperature. The quality and operations feeds
/// have no stored counterpart and always use their presets, as does any
/// feed when the store fails or holds no readings.
pub async fn seeded_config(feed: Feed, store: &dyn ProcessStore) -> SimulatorConfig {
    let mut config = feed.config();
    if !matches!(feed, Feed::Spectrometer | Feed::Furnace) {
        return config;
    }

    let latest = match store.recent_readings(SEED_WINDOW_HOURS).await {
        Ok(readings) => readings.into_iter().next(),
        Err(e) => {
            tracing::warn!(feed = %feed, error = %e, "Seed lookup failed, using preset");
            None
        }
    };
    let Some(reading) = latest else {
        return config;
    };

    match feed {
        Feed::Spectrometer => {
            for spec in &mut config.metrics {
                if let Some(&value) = reading.composition.get(&spec.reading.name) {
                    if value.is_finite() {
                        spec.reading.current = value;
                    }
                }
            }
        }
        Feed::Furnace => {
            if reading.temperature.is_finite() {
                if let Some(spec) = config
                    .metrics
                    .iter_mut()
                    .find(|m| m.reading.name == "Arc Zone")
                {
                    spec.reading.current = reading.temperature;
                }
            }
        }
        Feed::Quality | Feed::Operations => {}
    }
    config
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
