//! Sawtooth wave oscillator implementation.

use super::Oscillator;
use super::traits::cycle_position;

/// A sawtooth wave oscillator.
///
/// The waveform rises linearly from `-A` to just below `A` over each cycle,
/// then drops back to `-A`: `A·(2·frac(f t + φ/2π) − 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SawtoothOscillator {
    amplitude: f64,
    frequency: f64,
    phase: f64,
}

impl SawtoothOscillator {
    /// Creates a new sawtooth oscillator.
    ///
    /// # Arguments
    ///
    /// * `amplitude` - Half the peak-to-peak excursion
    /// * `frequency` - Frequency in cycles per unit time
    /// * `phase` - Phase offset in radians
    pub fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }
}

impl Oscillator for SawtoothOscillator {
    fn sample_at(&self, t: f64) -> f64 {
        let position = cycle_position(self.frequency, self.phase, t);
        self.amplitude * (2.0 * position - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SampleGrid;

    #[test]
    fn test_starts_at_negative_peak() {
        let osc = SawtoothOscillator::new(1.0, 1.0, 0.0);
        assert_eq!(osc.sample_at(0.0), -1.0);
    }

    #[test]
    fn test_midpoint_crosses_zero() {
        let osc = SawtoothOscillator::new(2.0, 1.0, 0.0);
        assert!(osc.sample_at(0.5).abs() < 1e-12);
    }

    #[test]
    fn test_half_open_range() {
        let osc = SawtoothOscillator::new(1.0, 2.7, 0.4);
        let grid = SampleGrid::default();
        for sample in osc.render(&grid) {
            assert!((-1.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_linearity() {
        let osc = SawtoothOscillator::new(1.0, 1.0, 0.0);
        let s1 = osc.sample_at(0.1);
        let s2 = osc.sample_at(0.2);
        let s3 = osc.sample_at(0.3);
        assert!(((s2 - s1) - (s3 - s2)).abs() < 1e-12);
    }
}
