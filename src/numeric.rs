//! Numeric helpers shared by every method: error measures and tolerances.

use serde::{Deserialize, Serialize};

use crate::error::{NumetrifyError, Result};

/// Error reported for the first record of a run, which has no predecessor.
pub const INITIAL_ERROR: f64 = 100.0;

/// How the distance between successive approximations is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ErrorType {
    /// `|xₙ − xₙ₋₁|` (wire value `1`)
    #[default]
    Absolute,
    /// `|xₙ − xₙ₋₁| / |xₙ|` (wire value `2`)
    Relative,
}

impl ErrorType {
    /// Error between two successive scalar approximations.
    ///
    /// `None` when the relative error is undefined: the step is non-zero but
    /// the current approximation is exactly zero. A zero step is error `0`.
    pub fn step_error(&self, current: f64, previous: f64) -> Option<f64> {
        self.scale((current - previous).abs(), current.abs())
    }

    /// Error between two successive vector approximations, in the infinity norm.
    ///
    /// `None` under the same condition as [`step_error`](Self::step_error),
    /// with `‖current‖∞` as the denominator.
    pub fn vector_error(&self, current: &[f64], previous: &[f64]) -> Option<f64> {
        let delta = current
            .iter()
            .zip(previous)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        self.scale(delta, infinity_norm(current))
    }

    fn scale(&self, delta: f64, magnitude: f64) -> Option<f64> {
        match self {
            Self::Absolute => Some(delta),
            Self::Relative if delta == 0.0 => Some(0.0),
            Self::Relative if magnitude == 0.0 => None,
            Self::Relative => Some(delta / magnitude),
        }
    }

    /// Tolerance used by the stationary iterative solvers.
    ///
    /// Absolute mode uses `0.5×10^−digits`, relative mode `5×10^−digits`.
    pub fn iterative_tolerance(&self, digits: f64) -> f64 {
        match self {
            Self::Absolute => 0.5 * 10f64.powf(-digits),
            Self::Relative => 5.0 * 10f64.powf(-digits),
        }
    }
}

impl TryFrom<u8> for ErrorType {
    type Error = NumetrifyError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Absolute),
            2 => Ok(Self::Relative),
            other => Err(NumetrifyError::invalid_parameter(
                "errorType",
                format!("expected 1 (absolute) or 2 (relative), got {}", other),
            )),
        }
    }
}

impl From<ErrorType> for u8 {
    fn from(value: ErrorType) -> Self {
        match value {
            ErrorType::Absolute => 1,
            ErrorType::Relative => 2,
        }
    }
}

/// Tolerance for a number of correct decimal digits: `0.5×10^−digits`.
pub fn tolerance_from_digits(digits: f64) -> f64 {
    0.5 * 10f64.powf(-digits)
}

/// Largest absolute entry of a vector.
pub fn infinity_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x.abs()).fold(0.0, f64::max)
}

/// Whether a freshly evaluated value may be used further.
#[inline]
pub fn is_defined(value: f64) -> bool {
    value.is_finite()
}
