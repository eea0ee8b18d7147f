//! Pre-planned transforms for a fixed signal length.
//!
//! The grid length never changes during a session, so the forward and
//! inverse plans are built once and shared by the spectral filters and the
//! spectrum analyzer.

use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// A forward/inverse FFT pair for signals of one length.
#[derive(Clone)]
pub struct SpectralPlan {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl SpectralPlan {
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        Self {
            len,
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discrete Fourier transform of a real signal of length `len()`.
    pub fn forward(&self, signal: &[f64]) -> Vec<Complex64> {
        debug_assert_eq!(signal.len(), self.len);
        let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        self.forward.process(&mut buffer);
        buffer
    }

    /// Inverse transform, keeping only the real part.
    ///
    /// rustfft leaves the inverse unscaled, so the result is divided by the
    /// length here. The imaginary residue is rounding noise and is dropped.
    pub fn inverse_real(&self, mut bins: Vec<Complex64>) -> Vec<f64> {
        debug_assert_eq!(bins.len(), self.len);
        self.inverse.process(&mut bins);
        let scale = 1.0 / self.len as f64;
        bins.iter().map(|c| c.re * scale).collect()
    }
}

impl fmt::Debug for SpectralPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectralPlan")
            .field("len", &self.len)
            .finish()
    }
}

/// Bin frequencies of an `n`-point DFT with sample spacing `spacing`.
///
/// Follows the conventional layout: index `k < ceil(n/2)` holds
/// `k / (n·spacing)`, the remaining indices hold `(k - n) / (n·spacing)`.
/// For even `n` the Nyquist bin `n/2` is therefore negative.
///
/// ```
/// use wavebench::fft::bin_frequencies;
///
/// assert_eq!(bin_frequencies(4, 0.25), vec![0.0, 1.0, -2.0, -1.0]);
/// assert_eq!(bin_frequencies(5, 1.0), vec![0.0, 0.2, 0.4, -0.4, -0.2]);
/// ```
pub fn bin_frequencies(n: usize, spacing: f64) -> Vec<f64> {
    let scale = 1.0 / (n as f64 * spacing);
    let positive = n.div_ceil(2);
    (0..n)
        .map(|k| {
            if k < positive {
                k as f64 * scale
            } else {
                (k as f64 - n as f64) * scale
            }
        })
        .collect()
}
