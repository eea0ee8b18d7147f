//! Butterworth low-pass design and zero-phase application.
//!
//! The analog prototype poles are mapped through the bilinear transform
//! with frequency pre-warping and grouped into second-order sections, each
//! normalized to unity gain at DC.

use super::biquad::Biquad;
use crate::error::{SignalError, SignalResult, ensure_finite};
use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

/// A Butterworth low-pass filter as a cascade of biquad sections.
///
/// # Examples
///
/// ```
/// use wavebench::filters::Butterworth;
///
/// // Order 3 at 2 Hz for a 100 Hz reference rate
/// let filter = Butterworth::lowpass(3, 2.0 / 50.0).unwrap();
/// let smooth = filter.filtfilt(&[1.0; 64]);
/// assert!(smooth.iter().all(|y| (y - 1.0).abs() < 1e-9));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Butterworth {
    order: usize,
    sections: Vec<Biquad>,
}

impl Butterworth {
    pub const MAX_ORDER: usize = 20;

    /// Designs a low-pass filter.
    ///
    /// # Arguments
    ///
    /// * `order` - Filter order, from 1 to [`Self::MAX_ORDER`]
    /// * `cutoff` - Cutoff as a fraction of Nyquist, strictly inside (0, 1)
    pub fn lowpass(order: usize, cutoff: f64) -> SignalResult<Self> {
        if order == 0 || order > Self::MAX_ORDER {
            return Err(SignalError::invalid(
                "order",
                format!("must be between 1 and {}, got {order}", Self::MAX_ORDER),
            ));
        }
        let cutoff = ensure_finite("cutoff", cutoff)?;
        if cutoff <= 0.0 || cutoff >= 1.0 {
            return Err(SignalError::invalid(
                "cutoff",
                format!("normalized cutoff must be inside (0, 1), got {cutoff}"),
            ));
        }

        // Design at a nominal rate of 2 so Nyquist is 1
        let fs = 2.0;
        let warped = 2.0 * fs * (PI * cutoff / fs).tan();
        let bilinear = |pole: Complex64| (2.0 * fs + pole) / (2.0 * fs - pole);

        let mut sections = Vec::with_capacity(order.div_ceil(2));
        // Upper-half-plane poles; each pairs with its conjugate
        for k in 0..order / 2 {
            let angle = PI * (2 * k + 1 + order) as f64 / (2 * order) as f64;
            let z = bilinear(Complex64::from_polar(warped, angle));
            let a1 = -2.0 * z.re;
            let a2 = z.norm_sqr();
            // Both zeros sit at z = -1
            let gain = (1.0 + a1 + a2) / 4.0;
            sections.push(Biquad::new(gain, 2.0 * gain, gain, a1, a2));
        }
        if order % 2 == 1 {
            let z = bilinear(Complex64::new(-warped, 0.0)).re;
            let a1 = -z;
            let gain = (1.0 + a1) / 2.0;
            sections.push(Biquad::new(gain, gain, 0.0, a1, 0.0));
        }

        Ok(Self { order, sections })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Magnitude response at a frequency given as a fraction of Nyquist.
    pub fn magnitude(&self, normalized: f64) -> f64 {
        let omega = PI * normalized;
        self.sections
            .iter()
            .map(|s| s.response(omega))
            .fold(Complex64::new(1.0, 0.0), |acc, h| acc * h)
            .norm()
    }

    /// Runs every section once, causally, over `signal`.
    ///
    /// The output lags the input by the filter's group delay.
    pub fn filter(&self, signal: &[f64]) -> Vec<f64> {
        self.sections
            .iter()
            .fold(signal.to_vec(), |acc, section| section.process(&acc))
    }

    /// Samples of odd extension added to each end before forward-backward
    /// filtering a signal of `len` samples.
    pub fn pad_len(&self, len: usize) -> usize {
        (3 * (self.order + 1)).min(len.saturating_sub(1))
    }

    /// Zero-phase filtering: forward pass, then a pass over the reversed
    /// result, reversed back.
    ///
    /// The signal is first extended at both ends by point reflection about
    /// its end samples, and each pass starts in steady state, so the output
    /// has no phase shift and no edge transients. The magnitude response is
    /// the square of a single pass.
    pub fn filtfilt(&self, signal: &[f64]) -> Vec<f64> {
        let n = signal.len();
        if n == 0 {
            return Vec::new();
        }
        let pad = self.pad_len(n);
        let extended = odd_extend(signal, pad);

        let mut forward = self.filter(&extended);
        forward.reverse();
        let mut backward = self.filter(&forward);
        backward.reverse();

        backward.drain(..pad);
        backward.truncate(n);
        backward
    }
}

/// Extends `signal` by `pad` samples at each end, reflecting them through
/// the end samples (`2·x[0] - x[i]` on the left).
fn odd_extend(signal: &[f64], pad: usize) -> Vec<f64> {
    let n = signal.len();
    let (first, last) = (signal[0], signal[n - 1]);
    let mut extended = Vec::with_capacity(n + 2 * pad);
    extended.extend((1..=pad).rev().map(|i| 2.0 * first - signal[i]));
    extended.extend_from_slice(signal);
    extended.extend((1..=pad).map(|i| 2.0 * last - signal[n - 1 - i]));
    extended
}
