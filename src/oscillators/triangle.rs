//! Triangle wave oscillator implementation.

use super::Oscillator;
use super::traits::cycle_position;

/// A triangle wave oscillator: `A·(2·|2·frac(f t + φ/2π) − 1| − 1)`.
///
/// Each cycle starts at the positive peak, falls linearly to `-A` at the
/// half cycle, then rises back to `A`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleOscillator {
    amplitude: f64,
    frequency: f64,
    phase: f64,
}

impl TriangleOscillator {
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }
}

impl Oscillator for TriangleOscillator {
    fn sample_at(&self, t: f64) -> f64 {
        let position = cycle_position(self.frequency, self.phase, t);
        self.amplitude * (2.0 * (2.0 * position - 1.0).abs() - 1.0)
    }
}
