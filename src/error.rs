//! Error types shared by every stage of the engine.

use thiserror::Error;

/// Result type for engine operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors that can occur while generating, filtering or analysing signals.
///
/// All of them are recoverable: a rejected update leaves the session in the
/// state it had before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    /// A numeric parameter is outside its valid range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Filter key not recognized
    #[error("unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Waveform shape key not recognized
    #[error("unsupported signal shape: {0}")]
    UnsupportedSignal(String),

    /// Noise family key not recognized
    #[error("unsupported noise family: {0}")]
    UnsupportedNoise(String),

    /// Array does not match the session grid
    #[error("signal length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SignalError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SignalError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Rejects NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> SignalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SignalError::invalid(
            name,
            format!("must be finite, got {value}"),
        ))
    }
}

/// Fails unless an array of `actual` samples matches the expected length.
pub(crate) fn check_len(expected: usize, actual: usize) -> SignalResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(SignalError::LengthMismatch { expected, actual })
    }
}

/// Rejects an array holding NaN or infinities, naming the first offender.
pub(crate) fn ensure_all_finite(
    name: &'static str,
    label: &str,
    samples: &[f64],
) -> SignalResult<()> {
    match samples.iter().position(|x| !x.is_finite()) {
        Some(i) => Err(SignalError::invalid(
            name,
            format!("{label} sample {i} is not finite"),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_parameter() {
        let err = SignalError::invalid("window", "must be odd");
        assert_eq!(err.to_string(), "invalid parameter `window`: must be odd");
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("mean", 0.5), Ok(0.5));
        assert!(ensure_finite("mean", f64::NAN).is_err());
        assert!(ensure_finite("mean", f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_len() {
        assert!(check_len(8, 8).is_ok());
        assert_eq!(
            check_len(8, 7),
            Err(SignalError::LengthMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn test_ensure_all_finite() {
        let samples = [0.0, -1.0, 1e300];
        assert!(ensure_all_finite("signal", "input", &samples).is_ok());
        let err = ensure_all_finite("signal", "filtered", &[0.0, f64::NAN]).unwrap_err();
        assert_eq!(
            err,
            SignalError::invalid("signal", "filtered sample 1 is not finite")
        );
    }
}
