//! Noise sources for the simulator.
//!
//! The simulator never calls the RNG directly: it samples through
//! [`NoiseSource`], so tests can script exact perturbation sequences.

use rand::Rng;

/// A source of bounded perturbations.
pub trait NoiseSource: Send {
    /// Sample a perturbation in `[-amplitude, +amplitude]`.
    fn sample(&mut self, amplitude: f64) -> f64;
}

/// Uniformly distributed noise from the thread RNG.
#[derive(Debug, Default)]
pub struct UniformNoise;

impl NoiseSource for UniformNoise {
    fn sample(&mut self, amplitude: f64) -> f64 {
        rand::rng().random_range(-amplitude..=amplitude)
    }
}

/// Replays a fixed sequence of steps, cycling when exhausted.
///
/// Steps are clamped to the requested amplitude so the [`NoiseSource`]
/// contract holds regardless of the script.
#[derive(Debug)]
pub struct ScriptedNoise {
    steps: Vec<f64>,
    index: usize,
}

impl ScriptedNoise {
    pub fn new(steps: Vec<f64>) -> Self {
        Self { steps, index: 0 }
    }

    /// A script that never perturbs anything.
    pub fn silent() -> Self {
        Self::new(vec![0.0])
    }
}

impl NoiseSource for ScriptedNoise {
    fn sample(&mut self, amplitude: f64) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        let step = self.steps[self.index % self.steps.len()];
        self.index += 1;
        step.clamp(-amplitude, amplitude)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
