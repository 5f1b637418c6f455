//! Polynomial interpolation through a set of points.
//!
//! Both methods return the interpolating polynomial as monomial
//! coefficients, highest degree first.

mod divided_differences;
mod vandermonde;

pub use divided_differences::newton_divided_differences;
pub use vandermonde::vandermonde;

use std::fmt::Write as _;

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

/// Reasons interpolation cannot proceed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationFailure {
    #[error("The X and Y values must have the same number of elements.")]
    LengthMismatch,

    #[error("The X values must not repeat to be a valid function.")]
    RepeatedX,

    #[error("At least one point is required to interpolate.")]
    Empty,

    #[error("The method does not work because matrix A is singular.")]
    Singular,
}

/// Result of an interpolation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpolation {
    pub message: String,
    /// Highest degree first.
    pub coefficients: Option<Vec<f64>>,
    pub polynomial: Option<String>,
}

impl Interpolation {
    pub(crate) fn found(method: &str, coefficients: Vec<f64>) -> Self {
        let polynomial = format_polynomial(&coefficients);
        debug!("{}: {}", method, polynomial);
        Self {
            message: format!("The polynomial that interpolates the given points is: {}", polynomial),
            coefficients: Some(coefficients),
            polynomial: Some(polynomial),
        }
    }

    pub(crate) fn failed(method: &str, failure: InterpolationFailure) -> Self {
        warn!("{}: {}", method, failure);
        Self {
            message: failure.to_string(),
            coefficients: None,
            polynomial: None,
        }
    }

    /// Value of the polynomial at `x`.
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        self.coefficients.as_deref().map(|c| horner(c, x))
    }
}

pub(crate) fn validate(x: &[f64], y: &[f64]) -> Result<(), InterpolationFailure> {
    if x.len() != y.len() {
        return Err(InterpolationFailure::LengthMismatch);
    }
    if x.is_empty() {
        return Err(InterpolationFailure::Empty);
    }
    for (i, a) in x.iter().enumerate() {
        if x[i + 1..].contains(a) {
            return Err(InterpolationFailure::RepeatedX);
        }
    }
    Ok(())
}

/// Horner evaluation, coefficients highest degree first.
pub fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * x + c)
}

/// Render coefficients, highest degree first, as `2.000x^2 - 3.000x + 1.000`.
pub fn format_polynomial(coefficients: &[f64]) -> String {
    let degree = coefficients.len().saturating_sub(1);
    let mut out = String::new();

    for (i, &c) in coefficients.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        let power = degree - i;
        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if c < 0.0 { " - " } else { " + " });
        }
        let _ = write!(out, "{:.3}", c.abs());
        match power {
            0 => {}
            1 => out.push('x'),
            p => {
                let _ = write!(out, "x^{}", p);
            }
        }
    }

    if out.is_empty() {
        out.push_str("0.000");
    }
    out
}
