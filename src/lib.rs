//! Wavebench - an interactive signal-processing engine
//!
//! This library generates periodic test waveforms on a uniform time grid,
//! corrupts them with additive noise, cleans them with a choice of filters,
//! and computes magnitude spectra for display. [`SessionState`] ties the
//! stages together and recomputes only what a parameter change affects.

mod config;
mod error;
pub mod fft;
pub mod filters;
mod grid;
pub mod noise;
pub mod oscillators;
mod session;
pub mod spectrum;

// Re-export commonly used types at the crate root
pub use config::{FilterFamily, GridConfig, ResetPolicy, SessionConfig};
pub use error::{SignalError, SignalResult};
pub use filters::{Butterworth, FilterBank, FilterKind, FilterParams, FilterSpec};
pub use grid::SampleGrid;
pub use noise::{GaussianNoise, NoiseFamily, NoiseSource, NoiseSpec, UniformNoise};
pub use oscillators::{
    Oscillator, SawtoothOscillator, SineOscillator, SquareOscillator, TriangleOscillator, WaveShape,
    WaveformSpec,
};
pub use session::{ParameterChange, SessionState, SignalState, SignalView, Snapshot};
pub use spectrum::{Spectrum, SpectrumAnalyzer, peak_to_peak};
