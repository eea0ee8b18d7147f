//! Sine wave oscillator implementation.

use super::Oscillator;
use std::f64::consts::TAU;

/// A sine wave oscillator: `A·sin(2π f t + φ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineOscillator {
    amplitude: f64,
    frequency: f64,
    /// Phase offset in radians
    phase: f64,
}

impl SineOscillator {
    /// Creates a new sine oscillator.
    ///
    /// # Arguments
    ///
    /// * `amplitude` - Peak value of the wave
    /// * `frequency` - Frequency in cycles per unit time
    /// * `phase` - Phase offset in radians
    ///
    /// # Examples
    ///
    /// ```
    /// use wavebench::{Oscillator, SineOscillator};
    ///
    /// let osc = SineOscillator::new(2.0, 1.0, 0.0);
    /// assert!((osc.sample_at(0.25) - 2.0).abs() < 1e-12);
    /// ```
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }
}

impl Oscillator for SineOscillator {
    fn sample_at(&self, t: f64) -> f64 {
        self.amplitude * (TAU * self.frequency * t + self.phase).sin()
    }
}
