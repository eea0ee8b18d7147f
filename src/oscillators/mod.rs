//! Periodic waveform generation.
//!
//! This module contains the `Oscillator` trait, one oscillator per supported
//! shape, and [`generate`], which validates a [`WaveformSpec`] and renders
//! the clean signal over a [`SampleGrid`].

mod sawtooth;
mod sine;
mod square;
mod traits;
mod triangle;

pub use sawtooth::SawtoothOscillator;
pub use sine::SineOscillator;
pub use square::SquareOscillator;
pub use traits::Oscillator;
pub use triangle::TriangleOscillator;

use crate::SampleGrid;
use crate::error::{SignalError, SignalResult, ensure_finite};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// The shape of a periodic waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveShape {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl WaveShape {
    pub const ALL: [WaveShape; 4] = [
        WaveShape::Sine,
        WaveShape::Square,
        WaveShape::Sawtooth,
        WaveShape::Triangle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WaveShape::Sine => "sine",
            WaveShape::Square => "square",
            WaveShape::Sawtooth => "sawtooth",
            WaveShape::Triangle => "triangle",
        }
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveShape {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sine" | "sin" => Ok(WaveShape::Sine),
            "square" => Ok(WaveShape::Square),
            "sawtooth" | "saw" => Ok(WaveShape::Sawtooth),
            "triangle" => Ok(WaveShape::Triangle),
            _ => Err(SignalError::UnsupportedSignal(s.to_string())),
        }
    }
}

/// Parameters that fully determine the clean signal on a given grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformSpec {
    pub shape: WaveShape,
    /// Peak value, strictly positive
    pub amplitude: f64,
    /// Cycles per unit time, strictly positive
    pub frequency: f64,
    /// Phase offset in radians
    pub phase: f64,
}

impl WaveformSpec {
    pub fn new(shape: WaveShape, amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            shape,
            amplitude,
            frequency,
            phase,
        }
    }

    /// Checks the ranges and returns the spec with its phase folded into
    /// `[0, 2π)`.
    pub fn validate(&self) -> SignalResult<Self> {
        let amplitude = ensure_finite("amplitude", self.amplitude)?;
        if amplitude <= 0.0 {
            return Err(SignalError::invalid(
                "amplitude",
                format!("must be positive, got {amplitude}"),
            ));
        }
        let frequency = ensure_finite("frequency", self.frequency)?;
        if frequency <= 0.0 {
            return Err(SignalError::invalid(
                "frequency",
                format!("must be positive, got {frequency}"),
            ));
        }
        let phase = ensure_finite("phase", self.phase)?.rem_euclid(TAU);
        // rem_euclid may round up to TAU itself
        let phase = if phase >= TAU { 0.0 } else { phase };

        Ok(Self {
            shape: self.shape,
            amplitude,
            frequency,
            phase,
        })
    }

    /// Builds the oscillator for this spec without validating it.
    pub fn oscillator(&self) -> Box<dyn Oscillator> {
        let (a, f, p) = (self.amplitude, self.frequency, self.phase);
        match self.shape {
            WaveShape::Sine => Box::new(SineOscillator::new(a, f, p)),
            WaveShape::Square => Box::new(SquareOscillator::new(a, f, p)),
            WaveShape::Sawtooth => Box::new(SawtoothOscillator::new(a, f, p)),
            WaveShape::Triangle => Box::new(TriangleOscillator::new(a, f, p)),
        }
    }
}

impl Default for WaveformSpec {
    fn default() -> Self {
        Self {
            shape: WaveShape::Sine,
            amplitude: 1.0,
            frequency: 1.0,
            phase: 0.0,
        }
    }
}

/// Renders the clean signal described by `spec` over `grid`.
///
/// # Errors
///
/// Returns [`SignalError::InvalidParameter`] when the amplitude or frequency
/// is not strictly positive, or when any parameter is not finite.
///
/// # Examples
///
/// ```
/// use wavebench::{SampleGrid, WaveShape, WaveformSpec, oscillators};
///
/// let grid = SampleGrid::default();
/// let spec = WaveformSpec::new(WaveShape::Square, 1.0, 1.0, 0.0);
/// let clean = oscillators::generate(&grid, &spec).unwrap();
/// assert_eq!(clean.len(), grid.len());
/// ```
pub fn generate(grid: &SampleGrid, spec: &WaveformSpec) -> SignalResult<Vec<f64>> {
    let spec = spec.validate()?;
    Ok(spec.oscillator().render(grid))
}
