//! The fixed time axis every signal array is sampled on.

use crate::error::{SignalError, SignalResult, ensure_finite};

/// An ordered, evenly spaced set of time instants over `[start, end]`.
///
/// Both endpoints are included, so `N` samples are separated by
/// `(end - start) / (N - 1)`. A grid never changes once built; every array
/// in a session has exactly `len()` samples.
///
/// # Examples
///
/// ```
/// use wavebench::SampleGrid;
///
/// let grid = SampleGrid::new(5, 0.0, 1.0).unwrap();
/// assert_eq!(grid.len(), 5);
/// assert_eq!(grid.spacing(), 0.25);
/// assert_eq!(grid.time(4), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    start: f64,
    end: f64,
    len: usize,
    spacing: f64,
}

impl SampleGrid {
    pub const DEFAULT_SAMPLES: usize = 1000;
    pub const DEFAULT_START: f64 = 0.0;
    pub const DEFAULT_END: f64 = 10.0;

    /// Creates a grid of `samples` instants from `start` to `end` inclusive.
    ///
    /// # Arguments
    ///
    /// * `samples` - Number of instants, at least 2
    /// * `start` - First instant
    /// * `end` - Last instant, strictly greater than `start`
    pub fn new(samples: usize, start: f64, end: f64) -> SignalResult<Self> {
        if samples < 2 {
            return Err(SignalError::invalid(
                "samples",
                format!("grid needs at least 2 samples, got {samples}"),
            ));
        }
        let start = ensure_finite("start", start)?;
        let end = ensure_finite("end", end)?;
        if end <= start {
            return Err(SignalError::invalid(
                "end",
                format!("must be greater than start ({start}), got {end}"),
            ));
        }

        Ok(Self {
            start,
            end,
            len: samples,
            spacing: (end - start) / (samples - 1) as f64,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Distance between consecutive instants (Δt).
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Highest frequency representable on this grid, `1 / (2Δt)`.
    pub fn nyquist(&self) -> f64 {
        0.5 / self.spacing
    }

    /// Instant at `index`. The last index maps exactly to `end`.
    pub fn time(&self, index: usize) -> f64 {
        if index + 1 == self.len {
            self.end
        } else {
            self.start + index as f64 * self.spacing
        }
    }

    /// Iterates over every instant in order.
    pub fn times(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len).map(move |i| self.time(i))
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        let (start, end) = (Self::DEFAULT_START, Self::DEFAULT_END);
        let len = Self::DEFAULT_SAMPLES;
        Self {
            start,
            end,
            len,
            spacing: (end - start) / (len - 1) as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = SampleGrid::default();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.time(0), 0.0);
        assert_eq!(grid.time(999), 10.0);
        assert!((grid.spacing() - 10.0 / 999.0).abs() < 1e-15);
    }

    #[test]
    fn test_times_are_ascending() {
        let grid = SampleGrid::new(64, -1.0, 1.0).unwrap();
        let times: Vec<f64> = grid.times().collect();
        assert_eq!(times.len(), 64);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(times[63], 1.0);
    }

    #[test]
    fn test_rejects_degenerate_grids() {
        assert!(SampleGrid::new(1, 0.0, 1.0).is_err());
        assert!(SampleGrid::new(10, 1.0, 1.0).is_err());
        assert!(SampleGrid::new(10, 2.0, 1.0).is_err());
        assert!(SampleGrid::new(10, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_nyquist() {
        let grid = SampleGrid::new(101, 0.0, 1.0).unwrap();
        assert!((grid.nyquist() - 50.0).abs() < 1e-9);
    }
}
