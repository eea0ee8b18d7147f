//! Core trait definitions for oscillators.

use crate::SampleGrid;
use std::f64::consts::TAU;

/// Common interface for all periodic waveform generators.
///
/// An oscillator is a pure function of time: evaluating it at the same
/// instant always yields the same value, so rendering the same grid twice
/// produces identical arrays.
pub trait Oscillator {
    /// Evaluates the waveform at time `t`.
    fn sample_at(&self, t: f64) -> f64;

    /// Evaluates the waveform at every instant of `grid`.
    ///
    /// Default implementation calls `sample_at()` for each instant.
    fn render(&self, grid: &SampleGrid) -> Vec<f64> {
        grid.times().map(|t| self.sample_at(t)).collect()
    }
}

/// Fractional position within the current cycle, in `[0.0, 1.0)`.
///
/// The phase offset is expressed in radians and converted to cycles.
pub(crate) fn cycle_position(frequency: f64, phase: f64, t: f64) -> f64 {
    let cycles = frequency * t + phase / TAU;
    let frac = cycles - cycles.floor();
    // floor() can leave exactly 1.0 for tiny negative inputs
    if frac >= 1.0 { 0.0 } else { frac }
}
