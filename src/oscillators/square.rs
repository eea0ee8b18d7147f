//! Square wave oscillator implementation.

use super::Oscillator;
use std::f64::consts::TAU;

/// A square wave oscillator: `A·sign(sin(2π f t + φ))`.
///
/// The sign of an exact zero crossing is 0, so the wave is 0 wherever the
/// underlying sine is exactly zero (for example at `t = 0` with `φ = 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareOscillator {
    amplitude: f64,
    frequency: f64,
    phase: f64,
}

impl SquareOscillator {
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }
}

impl Oscillator for SquareOscillator {
    fn sample_at(&self, t: f64) -> f64 {
        let s = (TAU * self.frequency * t + self.phase).sin();
        if s > 0.0 {
            self.amplitude
        } else if s < 0.0 {
            -self.amplitude
        } else {
            0.0
        }
    }
}
