//! Session configuration.
//!
//! Everything here is fixed for the lifetime of a session: the grid, the
//! random seed, how reset treats the random stream, and which filter family
//! the deployment exposes by default. A configuration is plain data and can
//! be loaded from JSON; missing fields fall back to their defaults.

use crate::error::{SignalError, SignalResult, ensure_finite};
use crate::filters::{FilterBank, FilterSpec};
use crate::grid::SampleGrid;
use serde::{Deserialize, Serialize};

/// Shape of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub samples: usize,
    pub start: f64,
    pub end: f64,
}

impl GridConfig {
    pub fn build(&self) -> SignalResult<SampleGrid> {
        SampleGrid::new(self.samples, self.start, self.end)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            samples: SampleGrid::DEFAULT_SAMPLES,
            start: SampleGrid::DEFAULT_START,
            end: SampleGrid::DEFAULT_END,
        }
    }
}

/// What a reset does to the random stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Rewind to the configured seed, so a reset reproduces the session's
    /// first noise realization. Without a seed, draw fresh OS entropy.
    #[default]
    Reseed,
    /// Keep drawing from the current stream; every reset yields new noise.
    Continue,
}

/// The filter family a deployment exposes, which decides the reset filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterFamily {
    /// Kernel, median and spectral filters; resets to a moving average
    #[default]
    Windowed,
    /// The zero-phase Butterworth filter; resets to order 3 at 2.0
    Recursive,
}

impl FilterFamily {
    pub fn default_filter(&self) -> FilterSpec {
        match self {
            FilterFamily::Windowed => FilterSpec::MovingAverage { window: 11 },
            FilterFamily::Recursive => FilterSpec::ZeroPhaseIir {
                order: 3,
                cutoff: 2.0,
            },
        }
    }
}

/// Configuration for a [`crate::SessionState`].
///
/// # Examples
///
/// ```
/// use wavebench::{FilterFamily, SessionConfig};
///
/// let config = SessionConfig::from_json(r#"{"seed": 7, "filter_family": "recursive"}"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.filter_family, FilterFamily::Recursive);
/// assert_eq!(config.grid.samples, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid: GridConfig,
    /// Seed for the noise RNG; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub reset_policy: ResetPolicy,
    pub filter_family: FilterFamily,
    /// Sample rate the zero-phase filter's cutoff is normalized against
    pub iir_reference_rate: f64,
}

impl SessionConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> SignalResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SignalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SignalResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SignalError::Config(e.to_string()))
    }

    pub fn validate(&self) -> SignalResult<()> {
        self.grid.build()?;
        let rate = ensure_finite("iir_reference_rate", self.iir_reference_rate)?;
        if rate <= 0.0 {
            return Err(SignalError::invalid(
                "iir_reference_rate",
                format!("must be positive, got {rate}"),
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            seed: None,
            reset_policy: ResetPolicy::default(),
            filter_family: FilterFamily::default(),
            iir_reference_rate: FilterBank::DEFAULT_REFERENCE_RATE,
        }
    }
}
