//! Live metric simulation.
//!
//! When no instrument feed is wired up, the dashboard still shows moving
//! numbers: each [`LiveSimulator`] perturbs its metrics with bounded random
//! noise on a fixed interval, re-classifies them through the tolerance
//! evaluator, and broadcasts a [`MetricsSnapshot`] per tick.
//!
//! Simulators are plain owned values: every subscriber (typically one
//! WebSocket connection per feed) creates its own, and dropping it stops
//! the background task. There is no process-wide simulator registry.

pub mod config;
pub mod noise;
pub mod presets;
pub mod seed;
pub mod simulator;
pub mod snapshot;

pub use config::{MetricSpec, SimulatorConfig};
pub use noise::{NoiseSource, ScriptedNoise, UniformNoise};
pub use presets::Feed;
pub use simulator::LiveSimulator;
pub use snapshot::{MetricState, MetricsSnapshot};
