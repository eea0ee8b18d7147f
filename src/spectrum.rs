//! Magnitude spectra and amplitude measurements for display.

use crate::error::{SignalError, SignalResult, check_len, ensure_all_finite, ensure_finite};
use crate::fft::{SpectralPlan, bin_frequencies};
use std::sync::Arc;

/// Bin frequencies and magnitudes of one signal.
///
/// Both arrays have the signal's length and share the transform's bin
/// order: non-negative frequencies ascending from DC first, then negative
/// frequencies ascending toward zero. For an even length the bin at `N/2`
/// is the negative Nyquist frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// `(frequency, magnitude)` pairs for the non-negative bins, in
    /// ascending frequency.
    pub fn non_negative(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .zip(&self.magnitudes)
            .filter(|(f, _)| **f >= 0.0)
            .map(|(&f, &m)| (f, m))
    }

    /// The strongest non-negative bin, if any.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.non_negative().max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// The strongest non-negative bin above DC, if any.
    pub fn dominant_frequency(&self) -> Option<f64> {
        self.non_negative()
            .filter(|(f, _)| *f > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| f)
    }
}

/// Computes spectra of arrays sampled on one grid.
#[derive(Debug, Clone)]
pub struct SpectrumAnalyzer {
    plan: Arc<SpectralPlan>,
    frequencies: Vec<f64>,
}

impl SpectrumAnalyzer {
    /// Creates an analyzer for signals of `len` samples spaced `spacing`
    /// apart.
    pub fn new(len: usize, spacing: f64) -> SignalResult<Self> {
        Self::with_plan(Arc::new(SpectralPlan::new(len)), spacing)
    }

    pub(crate) fn with_plan(plan: Arc<SpectralPlan>, spacing: f64) -> SignalResult<Self> {
        let spacing = ensure_finite("spacing", spacing)?;
        if spacing <= 0.0 {
            return Err(SignalError::invalid(
                "spacing",
                format!("must be positive, got {spacing}"),
            ));
        }
        let frequencies = bin_frequencies(plan.len(), spacing);
        Ok(Self { plan, frequencies })
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Magnitude of every DFT bin of `signal`.
    pub fn spectrum(&self, signal: &[f64]) -> SignalResult<Spectrum> {
        check_len(self.len(), signal.len())?;
        ensure_all_finite("signal", "input", signal)?;
        let bins = self.plan.forward(signal);
        let magnitudes: Vec<f64> = bins.iter().map(|c| c.norm()).collect();
        ensure_all_finite("signal", "magnitude", &magnitudes)?;
        Ok(Spectrum {
            frequencies: self.frequencies.clone(),
            magnitudes,
        })
    }
}

/// One-off spectrum of `signal` with sample spacing `spacing`.
///
/// Plans a transform for this call only; use [`SpectrumAnalyzer`] when
/// analysing many arrays of the same length.
///
/// # Examples
///
/// ```
/// use wavebench::spectrum::spectrum;
///
/// let signal: Vec<f64> = (0..8).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
/// let spec = spectrum(&signal, 0.5).unwrap();
/// // All energy sits in the Nyquist bin, which is listed as negative
/// assert_eq!(spec.frequencies[4], -1.0);
/// assert!((spec.magnitudes[4] - 8.0).abs() < 1e-12);
/// ```
pub fn spectrum(signal: &[f64], spacing: f64) -> SignalResult<Spectrum> {
    SpectrumAnalyzer::new(signal.len(), spacing)?.spectrum(signal)
}

/// Distance between the largest and smallest sample, 0 when empty.
pub fn peak_to_peak(samples: &[f64]) -> f64 {
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    if samples.is_empty() { 0.0 } else { max - min }
}
