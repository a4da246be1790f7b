//! Timer-driven metric simulation loop.

use std::fmt;

use advisor_core::error::CoreError;
use advisor_core::reading::MetricReading;
use advisor_core::tolerance::ToleranceEvaluator;
use chrono::Utc;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::{MetricSpec, SimulatorConfig};
use crate::noise::{NoiseSource, UniformNoise};
use crate::snapshot::{MetricState, MetricsSnapshot};

/// Snapshot channel depth. Subscribers that fall further behind than this
/// see a `Lagged` error and resume from the newest snapshot.
pub const SNAPSHOT_CAPACITY: usize = 32;

/// Simulates one feed of live metrics.
///
/// [`start`](Self::start) spawns a background task that emits a
/// [`MetricsSnapshot`] every interval. The first snapshot lands one full
/// interval after start; nothing is emitted at start time itself.
/// `start` and [`stop`](Self::stop) are both idempotent, and starting
/// again after a stop does nothing. Dropping the simulator stops the task.
pub struct LiveSimulator {
    config: SimulatorConfig,
    evaluator: ToleranceEvaluator,
    sender: broadcast::Sender<MetricsSnapshot>,
    cancel: CancellationToken,
    /// Taken by the first `start` call; `None` afterwards.
    noise: Option<Box<dyn NoiseSource>>,
}

impl fmt::Debug for LiveSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveSimulator")
            .field("config", &self.config)
            .field("evaluator", &self.evaluator)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl LiveSimulator {
    pub fn new(config: SimulatorConfig, noise: Box<dyn NoiseSource>) -> Result<Self, CoreError> {
        config.validate()?;
        let evaluator = ToleranceEvaluator::new(config.thresholds)?;
        let (sender, _) = broadcast::channel(SNAPSHOT_CAPACITY);
        Ok(Self {
            config,
            evaluator,
            sender,
            cancel: CancellationToken::new(),
            noise: Some(noise),
        })
    }

    /// Build a simulator with thread-RNG noise, the production default.
    pub fn with_uniform_noise(config: SimulatorConfig) -> Result<Self, CoreError> {
        Self::new(config, Box::new(UniformNoise))
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Receive snapshots. Subscribing before `start` is fine; the stream
    /// begins at the first tick after `start`.
    pub fn subscribe(&self) -> broadcast::Receiver<MetricsSnapshot> {
        self.sender.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.noise.is_none() && !self.cancel.is_cancelled()
    }

    /// Spawn the simulation loop. Calling again, or after [`stop`](Self::stop),
    /// does nothing.
    pub fn start(&mut self) {
        if self.cancel.is_cancelled() {
            return;
        }
        let Some(noise) = self.noise.take() else {
            return;
        };
        tokio::spawn(run_loop(
            self.config.clone(),
            self.evaluator,
            self.sender.clone(),
            self.cancel.clone(),
            noise,
        ));
    }

    /// Stop the simulation loop. Safe to call repeatedly.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LiveSimulator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_loop(
    config: SimulatorConfig,
    evaluator: ToleranceEvaluator,
    sender: broadcast::Sender<MetricsSnapshot>,
    cancel: CancellationToken,
    mut noise: Box<dyn NoiseSource>,
) {
    tracing::info!(
        feed = %config.feed,
        interval_ms = config.interval.as_millis() as u64,
        metrics = config.metrics.len(),
        "Live simulation started"
    );

    // First tick fires one full interval from now, not immediately.
    let mut ticker = interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut currents: Vec<f64> = config.metrics.iter().map(|m| m.reading.current).collect();
    let mut seq: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(feed = %config.feed, "Live simulation stopped");
                break;
            }
            _ = ticker.tick() => {
                seq += 1;
                match capture(&config, &evaluator, &mut currents, noise.as_mut(), seq) {
                    Ok(snapshot) => {
                        // No subscribers is fine; the snapshot is simply dropped.
                        let _ = sender.send(snapshot);
                    }
                    Err(e) => {
                        tracing::error!(feed = %config.feed, seq, error = %e, "Snapshot evaluation failed");
                    }
                }
            }
        }
    }
}

/// Advance every metric one step and classify the results.
fn capture(
    config: &SimulatorConfig,
    evaluator: &ToleranceEvaluator,
    currents: &mut [f64],
    noise: &mut dyn NoiseSource,
    seq: u64,
) -> Result<MetricsSnapshot, CoreError> {
    let mut metrics = Vec::with_capacity(config.metrics.len());
    for (spec, current) in config.metrics.iter().zip(currents.iter_mut()) {
        *current = advance(spec, *current, config.noise_amplitude, noise);
        let reading = MetricReading {
            current: *current,
            ..spec.reading.clone()
        };
        let eval = evaluator.evaluate(&reading)?;
        metrics.push(MetricState::new(
            reading.name,
            reading.unit,
            reading.current,
            reading.target,
            reading.tolerance,
            eval.band,
            config.taxonomy,
            eval.position,
        ));
    }
    Ok(MetricsSnapshot {
        feed: config.feed.clone(),
        seq,
        captured_at: Utc::now(),
        metrics,
    })
}

/// One perturbation step: noise, then the metric's clamps, then the
/// universal floor at zero. A non-finite step leaves the value unchanged
/// so a misbehaving noise source cannot poison the series.
fn advance(
    spec: &MetricSpec,
    current: f64,
    default_amplitude: f64,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let amplitude = spec.noise_amplitude.unwrap_or(default_amplitude);
    let mut next = current + noise.sample(amplitude);
    if !next.is_finite() {
        return current;
    }
    if let Some(min) = spec.clamp_min {
        next = next.max(min);
    }
    if let Some(max) = spec.clamp_max {
        next = next.min(max);
    }
    next.max(0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
