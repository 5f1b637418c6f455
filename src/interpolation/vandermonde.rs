//! Interpolation by solving the Vandermonde system.

use super::{validate, Interpolation, InterpolationFailure};
use crate::linear::{pivot_gaussian_elimination, Matrix};

/// Solve `V·a = y` with `V[i][j] = xᵢ^(n−j−1)`.
pub fn vandermonde(x: &[f64], y: &[f64]) -> Interpolation {
    const METHOD: &str = "Vandermonde";

    if let Err(failure) = validate(x, y) {
        return Interpolation::failed(METHOD, failure);
    }

    let n = x.len();
    let mut v = Matrix::zeros(n);
    for (i, &xi) in x.iter().enumerate() {
        for j in 0..n {
            v.set(i, j, xi.powi((n - j - 1) as i32));
        }
    }

    match pivot_gaussian_elimination(&v, y).solution {
        Some(coefficients) => Interpolation::found(METHOD, coefficients),
        None => Interpolation::failed(METHOD, InterpolationFailure::Singular),
    }
}
