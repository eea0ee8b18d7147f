//! Ideal low-pass and high-pass filtering by masking DFT bins.

use crate::fft::SpectralPlan;

/// Which side of the cutoff a spectral mask keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralMask {
    /// Keeps bins with `|f| < cutoff`
    LowPass,
    /// Keeps bins with `|f| >= cutoff`
    HighPass,
}

impl SpectralMask {
    /// Whether a bin at `frequency` survives the mask.
    ///
    /// The two masks are exact complements, so for any cutoff every bin is
    /// kept by exactly one of them.
    pub fn keeps(&self, frequency: f64, cutoff: f64) -> bool {
        let below = frequency.abs() < cutoff;
        match self {
            SpectralMask::LowPass => below,
            SpectralMask::HighPass => !below,
        }
    }
}

/// Transforms `signal`, zeroes every bin the mask rejects, and returns the
/// real part of the inverse transform.
///
/// `frequencies` holds the bin frequencies for `plan` in transform order.
pub fn apply_mask(
    plan: &SpectralPlan,
    frequencies: &[f64],
    signal: &[f64],
    cutoff: f64,
    mask: SpectralMask,
) -> Vec<f64> {
    let mut bins = plan.forward(signal);
    for (bin, &freq) in bins.iter_mut().zip(frequencies) {
        if !mask.keeps(freq, cutoff) {
            *bin = Default::default();
        }
    }
    plan.inverse_real(bins)
}
