//! Gaussian noise source implementation.

use super::NoiseSource;
use crate::error::{SignalError, SignalResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Normally distributed noise with a given mean and variance.
///
/// Each sample is drawn independently from `Normal(mean, sqrt(variance))`.
#[derive(Debug, Clone, Copy)]
pub struct GaussianNoise {
    distribution: Normal<f64>,
}

impl GaussianNoise {
    /// Creates a new Gaussian noise source.
    ///
    /// # Arguments
    ///
    /// * `mean` - Center of the distribution
    /// * `variance` - Spread of the distribution, non-negative
    ///
    /// # Examples
    ///
    /// ```
    /// use wavebench::{GaussianNoise, NoiseSource};
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let noise = GaussianNoise::new(0.0, 0.2).unwrap();
    /// let sample = noise.next_sample(&mut rng);
    /// assert!(sample.is_finite());
    /// ```
    pub fn new(mean: f64, variance: f64) -> SignalResult<Self> {
        let distribution = Normal::new(mean, variance.sqrt())
            .map_err(|e| SignalError::invalid("variance", e.to_string()))?;
        Ok(Self { distribution })
    }
}

impl NoiseSource for GaussianNoise {
    fn next_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.distribution.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = GaussianNoise::new(0.5, 0.2).unwrap();
        let mut buffer = vec![0.0; 50_000];
        noise.fill(&mut buffer, &mut rng);

        let n = buffer.len() as f64;
        let mean = buffer.iter().sum::<f64>() / n;
        let variance = buffer.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        assert!((mean - 0.5).abs() < 0.01, "mean {mean}");
        assert!((variance - 0.2).abs() < 0.01, "variance {variance}");
    }

    #[test]
    fn test_zero_variance_is_constant() {
        let mut rng = StdRng::seed_from_u64(1);
        let noise = GaussianNoise::new(0.3, 0.0).unwrap();
        for _ in 0..100 {
            assert_eq!(noise.next_sample(&mut rng), 0.3);
        }
    }

    #[test]
    fn test_randomness() {
        let mut rng = StdRng::seed_from_u64(3);
        let noise = GaussianNoise::new(0.0, 1.0).unwrap();
        let samples: Vec<f64> = (0..100).map(|_| noise.next_sample(&mut rng)).collect();
        let first = samples[0];
        assert!(!samples.iter().all(|&s| s == first));
    }
}
