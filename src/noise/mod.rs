//! Additive noise generation.
//!
//! A noise array is a random *realization*, not a pure function of its
//! [`NoiseSpec`]: every call to [`generate`] consumes entropy from the
//! supplied RNG and yields a fresh draw. Callers that need a stable
//! realization must keep the array rather than regenerate it.

mod gaussian;
mod uniform;

pub use gaussian::GaussianNoise;
pub use uniform::UniformNoise;

use crate::SampleGrid;
use crate::error::{SignalError, SignalResult, ensure_finite};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Common interface for noise sources.
///
/// Sources hold only their distribution; the RNG is supplied by the caller
/// so that a single owner controls the random stream.
pub trait NoiseSource {
    /// Draws one sample.
    fn next_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Fills `buffer` with independent samples.
    ///
    /// Default implementation calls `next_sample()` for each element.
    fn fill<R: Rng + ?Sized>(&self, buffer: &mut [f64], rng: &mut R) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(rng);
        }
    }
}

/// The distribution family noise is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseFamily {
    #[default]
    Gaussian,
    Uniform,
    None,
}

impl NoiseFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseFamily::Gaussian => "gaussian",
            NoiseFamily::Uniform => "uniform",
            NoiseFamily::None => "none",
        }
    }
}

impl fmt::Display for NoiseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseFamily {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gaussian" | "normal" => Ok(NoiseFamily::Gaussian),
            "uniform" => Ok(NoiseFamily::Uniform),
            "none" | "off" => Ok(NoiseFamily::None),
            _ => Err(SignalError::UnsupportedNoise(s.to_string())),
        }
    }
}

/// Parameters of the noise distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSpec {
    pub family: NoiseFamily,
    pub mean: f64,
    /// Non-negative
    pub variance: f64,
}

impl NoiseSpec {
    pub fn new(family: NoiseFamily, mean: f64, variance: f64) -> Self {
        Self {
            family,
            mean,
            variance,
        }
    }

    pub fn none() -> Self {
        Self::new(NoiseFamily::None, 0.0, 0.0)
    }

    pub fn validate(&self) -> SignalResult<()> {
        ensure_finite("mean", self.mean)?;
        let variance = ensure_finite("variance", self.variance)?;
        if variance < 0.0 {
            return Err(SignalError::invalid(
                "variance",
                format!("must be non-negative, got {variance}"),
            ));
        }
        if self.family == NoiseFamily::Uniform {
            UniformNoise::new(self.mean, variance)?;
        }
        Ok(())
    }
}

impl Default for NoiseSpec {
    fn default() -> Self {
        Self {
            family: NoiseFamily::Gaussian,
            mean: 0.0,
            variance: 0.2,
        }
    }
}

/// Draws a noise realization over `grid`.
///
/// # Errors
///
/// Returns [`SignalError::InvalidParameter`] for a negative or non-finite
/// variance, a non-finite mean, or a uniform support that overflows.
/// Nothing is drawn from `rng` on failure.
///
/// # Examples
///
/// ```
/// use wavebench::{NoiseSpec, SampleGrid, noise};
/// use rand::SeedableRng;
///
/// let grid = SampleGrid::default();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let first = noise::generate(&grid, &NoiseSpec::default(), &mut rng).unwrap();
/// let second = noise::generate(&grid, &NoiseSpec::default(), &mut rng).unwrap();
/// assert_ne!(first, second);
/// ```
pub fn generate<R: Rng + ?Sized>(
    grid: &SampleGrid,
    spec: &NoiseSpec,
    rng: &mut R,
) -> SignalResult<Vec<f64>> {
    spec.validate()?;

    let mut buffer = vec![0.0; grid.len()];
    match spec.family {
        NoiseFamily::Gaussian => {
            GaussianNoise::new(spec.mean, spec.variance)?.fill(&mut buffer, rng)
        }
        NoiseFamily::Uniform => UniformNoise::new(spec.mean, spec.variance)?.fill(&mut buffer, rng),
        NoiseFamily::None => {}
    }
    Ok(buffer)
}
