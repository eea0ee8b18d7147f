//! Uniform noise source implementation.

use super::NoiseSource;
use crate::error::{SignalError, SignalResult};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};

/// Uniformly distributed noise with a given mean and variance.
///
/// Samples are drawn from `[mean - h, mean + h)` with `h = sqrt(3·variance)`,
/// the half-width for which a uniform distribution has exactly the
/// requested variance.
#[derive(Debug, Clone, Copy)]
pub struct UniformNoise {
    mean: f64,
    half_width: f64,
    /// `None` when the support collapses to the mean
    distribution: Option<Uniform<f64>>,
}

impl UniformNoise {
    /// Creates a new uniform noise source.
    ///
    /// When the support is too narrow to separate its bounds at the mean's
    /// magnitude, every sample is the mean.
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::InvalidParameter`] when the bounds or the
    /// width of the support are not finite.
    pub fn new(mean: f64, variance: f64) -> SignalResult<Self> {
        let half_width = (3.0 * variance).sqrt();
        let (low, high) = (mean - half_width, mean + half_width);
        if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
            return Err(SignalError::invalid(
                "variance",
                format!("support of mean {mean} and variance {variance} overflows"),
            ));
        }
        let distribution = (low < high).then(|| Uniform::new(low, high));
        Ok(Self {
            mean,
            half_width,
            distribution,
        })
    }

    /// Half-width of the support around the mean.
    pub fn half_width(&self) -> f64 {
        self.half_width
    }
}

impl NoiseSource for UniformNoise {
    fn next_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.distribution {
            Some(distribution) => distribution.sample(rng),
            None => self.mean,
        }
    }
}
