//! Filters for cleaning up noisy signals.
//!
//! This module provides interchangeable filters that all map an array of
//! `N` samples to a new array of `N` samples:
//! - windowed kernel convolution (moving average, Gaussian)
//! - order-statistic filtering (median)
//! - ideal spectral masking (low-pass, high-pass)
//! - a zero-phase Butterworth low-pass
//!
//! The entry point is [`FilterBank`], which is built once for a
//! [`SampleGrid`] and dispatches on a [`FilterSpec`].

mod biquad;
mod butterworth;
mod kernel;
mod median;
mod spectral;

pub use self::biquad::Biquad;
pub use self::butterworth::Butterworth;
pub use self::kernel::{convolve_edge, edge_pad, gaussian_kernel, moving_average_kernel};
pub use self::median::median_filter;
pub use self::spectral::{SpectralMask, apply_mask};

use crate::SampleGrid;
use crate::error::{SignalError, SignalResult, check_len, ensure_all_finite, ensure_finite};
use crate::fft::{SpectralPlan, bin_frequencies};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::trace;

/// Standard deviation of the Gaussian kernel, in kernel-domain units.
pub const GAUSSIAN_SIGMA: f64 = 1.0;

/// A filter and its parameters.
///
/// Windowed filters take an odd `window` of at least 3 samples. Spectral
/// filters take a `cutoff` in cycles per unit time, strictly between 0 and
/// the grid's Nyquist frequency. The zero-phase filter's `cutoff` is
/// measured against the bank's fixed reference rate instead of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    MovingAverage { window: usize },
    GaussianKernel { window: usize },
    Median { window: usize },
    LowPass { cutoff: f64 },
    HighPass { cutoff: f64 },
    ZeroPhaseIir { order: usize, cutoff: f64 },
    None,
}

impl FilterSpec {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterSpec::MovingAverage { .. } => FilterKind::MovingAverage,
            FilterSpec::GaussianKernel { .. } => FilterKind::GaussianKernel,
            FilterSpec::Median { .. } => FilterKind::Median,
            FilterSpec::LowPass { .. } => FilterKind::LowPass,
            FilterSpec::HighPass { .. } => FilterKind::HighPass,
            FilterSpec::ZeroPhaseIir { .. } => FilterKind::ZeroPhaseIir,
            FilterSpec::None => FilterKind::None,
        }
    }

    /// Builds a spec of `kind`, taking whichever of `params` that kind uses.
    pub fn from_params(kind: FilterKind, params: &FilterParams) -> Self {
        match kind {
            FilterKind::MovingAverage => FilterSpec::MovingAverage {
                window: params.window,
            },
            FilterKind::GaussianKernel => FilterSpec::GaussianKernel {
                window: params.window,
            },
            FilterKind::Median => FilterSpec::Median {
                window: params.window,
            },
            FilterKind::LowPass => FilterSpec::LowPass {
                cutoff: params.cutoff,
            },
            FilterKind::HighPass => FilterSpec::HighPass {
                cutoff: params.cutoff,
            },
            FilterKind::ZeroPhaseIir => FilterSpec::ZeroPhaseIir {
                order: params.order,
                cutoff: params.cutoff,
            },
            FilterKind::None => FilterSpec::None,
        }
    }

    /// Parses a filter key and builds the spec from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::UnsupportedFilter`] for an unknown key.
    pub fn from_key(key: &str, params: &FilterParams) -> SignalResult<Self> {
        Ok(Self::from_params(key.parse()?, params))
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec::MovingAverage { window: 11 }
    }
}

/// Filter kind without its parameters, as chosen from a list of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    MovingAverage,
    GaussianKernel,
    Median,
    LowPass,
    HighPass,
    ZeroPhaseIir,
    None,
}

impl FilterKind {
    pub const ALL: [FilterKind; 7] = [
        FilterKind::MovingAverage,
        FilterKind::GaussianKernel,
        FilterKind::Median,
        FilterKind::LowPass,
        FilterKind::HighPass,
        FilterKind::ZeroPhaseIir,
        FilterKind::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::MovingAverage => "moving_average",
            FilterKind::GaussianKernel => "gaussian_kernel",
            FilterKind::Median => "median",
            FilterKind::LowPass => "low_pass",
            FilterKind::HighPass => "high_pass",
            FilterKind::ZeroPhaseIir => "zero_phase_iir",
            FilterKind::None => "none",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "moving_average" => Ok(FilterKind::MovingAverage),
            "gaussian_kernel" | "gaussian" => Ok(FilterKind::GaussianKernel),
            "median" => Ok(FilterKind::Median),
            "low_pass" | "lowpass" => Ok(FilterKind::LowPass),
            "high_pass" | "highpass" => Ok(FilterKind::HighPass),
            "zero_phase_iir" | "butterworth" => Ok(FilterKind::ZeroPhaseIir),
            "none" => Ok(FilterKind::None),
            _ => Err(SignalError::UnsupportedFilter(s.to_string())),
        }
    }
}

/// The full set of filter controls, of which each kind reads a subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub window: usize,
    pub order: usize,
    pub cutoff: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            window: 11,
            order: 3,
            cutoff: 2.0,
        }
    }
}

/// Applies any [`FilterSpec`] to arrays sampled on one grid.
///
/// The bank owns the transform plan and bin frequencies for the grid
/// length, so spectral filters reuse them on every call.
#[derive(Debug, Clone)]
pub struct FilterBank {
    plan: Arc<SpectralPlan>,
    frequencies: Vec<f64>,
    spacing: f64,
    reference_rate: f64,
}

impl FilterBank {
    /// Sample rate the zero-phase filter's cutoff is normalized against.
    pub const DEFAULT_REFERENCE_RATE: f64 = 100.0;

    pub fn new(grid: &SampleGrid) -> Self {
        Self::with_plan(
            grid,
            Arc::new(SpectralPlan::new(grid.len())),
            Self::DEFAULT_REFERENCE_RATE,
        )
    }

    /// Creates a bank whose zero-phase filter uses `reference_rate`.
    pub fn with_reference_rate(grid: &SampleGrid, reference_rate: f64) -> SignalResult<Self> {
        let reference_rate = ensure_finite("reference_rate", reference_rate)?;
        if reference_rate <= 0.0 {
            return Err(SignalError::invalid(
                "reference_rate",
                format!("must be positive, got {reference_rate}"),
            ));
        }
        Ok(Self::with_plan(
            grid,
            Arc::new(SpectralPlan::new(grid.len())),
            reference_rate,
        ))
    }

    pub(crate) fn with_plan(
        grid: &SampleGrid,
        plan: Arc<SpectralPlan>,
        reference_rate: f64,
    ) -> Self {
        Self {
            plan,
            frequencies: bin_frequencies(grid.len(), grid.spacing()),
            spacing: grid.spacing(),
            reference_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    /// Upper bound (exclusive) for spectral cutoffs.
    pub fn nyquist(&self) -> f64 {
        0.5 / self.spacing
    }

    /// Upper bound (exclusive) for the zero-phase filter's cutoff.
    pub fn reference_nyquist(&self) -> f64 {
        self.reference_rate / 2.0
    }

    /// Checks `spec` against this bank without filtering anything.
    pub fn validate(&self, spec: &FilterSpec) -> SignalResult<()> {
        match *spec {
            FilterSpec::MovingAverage { window }
            | FilterSpec::GaussianKernel { window }
            | FilterSpec::Median { window } => check_window(window),
            FilterSpec::LowPass { cutoff } | FilterSpec::HighPass { cutoff } => {
                check_cutoff(cutoff, self.nyquist())
            }
            FilterSpec::ZeroPhaseIir { order, cutoff } => {
                check_cutoff(cutoff, self.reference_nyquist())?;
                let max = Butterworth::MAX_ORDER;
                if order == 0 || order > max {
                    return Err(SignalError::invalid(
                        "order",
                        format!("must be between 1 and {max}, got {order}"),
                    ));
                }
                Ok(())
            }
            FilterSpec::None => Ok(()),
        }
    }

    /// Filters `signal` according to `spec`.
    ///
    /// # Errors
    ///
    /// - [`SignalError::LengthMismatch`] if `signal` is not sampled on this
    ///   bank's grid
    /// - [`SignalError::InvalidParameter`] for an even or too small window,
    ///   an out-of-range cutoff or order, a non-finite input sample, or
    ///   input large enough that the filtered output overflows
    ///
    /// # Examples
    ///
    /// ```
    /// use wavebench::{FilterBank, FilterSpec, SampleGrid};
    ///
    /// let grid = SampleGrid::new(100, 0.0, 1.0).unwrap();
    /// let bank = FilterBank::new(&grid);
    /// let out = bank.apply(&[2.0; 100], &FilterSpec::MovingAverage { window: 5 }).unwrap();
    /// assert!(out.iter().all(|y| (y - 2.0).abs() < 1e-12));
    /// ```
    pub fn apply(&self, signal: &[f64], spec: &FilterSpec) -> SignalResult<Vec<f64>> {
        check_len(self.len(), signal.len())?;
        ensure_all_finite("signal", "input", signal)?;
        self.validate(spec)?;
        trace!(kind = %spec.kind(), len = signal.len(), "applying filter");

        let filtered = match *spec {
            FilterSpec::MovingAverage { window } => {
                convolve_edge(signal, &moving_average_kernel(window))
            }
            FilterSpec::GaussianKernel { window } => {
                convolve_edge(signal, &gaussian_kernel(window, GAUSSIAN_SIGMA))
            }
            FilterSpec::Median { window } => median_filter(signal, window),
            FilterSpec::LowPass { cutoff } => apply_mask(
                &self.plan,
                &self.frequencies,
                signal,
                cutoff,
                SpectralMask::LowPass,
            ),
            FilterSpec::HighPass { cutoff } => apply_mask(
                &self.plan,
                &self.frequencies,
                signal,
                cutoff,
                SpectralMask::HighPass,
            ),
            FilterSpec::ZeroPhaseIir { order, cutoff } => {
                Butterworth::lowpass(order, cutoff / self.reference_nyquist())?.filtfilt(signal)
            }
            FilterSpec::None => signal.to_vec(),
        };
        // Finite input of extreme magnitude can still overflow
        ensure_all_finite("signal", "filtered", &filtered)?;
        Ok(filtered)
    }
}

fn check_window(window: usize) -> SignalResult<()> {
    if window < 3 {
        return Err(SignalError::invalid(
            "window",
            format!("must be at least 3, got {window}"),
        ));
    }
    if window % 2 == 0 {
        return Err(SignalError::invalid(
            "window",
            format!("must be odd, got {window}"),
        ));
    }
    Ok(())
}

fn check_cutoff(cutoff: f64, nyquist: f64) -> SignalResult<()> {
    let cutoff = ensure_finite("cutoff", cutoff)?;
    if cutoff <= 0.0 || cutoff >= nyquist {
        return Err(SignalError::invalid(
            "cutoff",
            format!("must be inside (0, {nyquist}), got {cutoff}"),
        ));
    }
    Ok(())
}
