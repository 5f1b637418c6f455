//! Linear systems `A·x = b`.
//!
//! ## Direct solvers
//!
//! Each direct solver works on a private copy of `A` and returns a
//! [`DirectSolution`]. Factorizations also return their `L` and `U`:
//!
//! | Solver | `L` | `U` |
//! |--------|-----|-----|
//! | [`lu_gaussian_elimination`] | unit lower (multipliers) | upper |
//! | [`doolittle`] | unit lower | upper |
//! | [`crout`] | lower | unit upper |
//! | [`cholesky`] | lower | `Lᵗ` |
//!
//! ## Iterative solvers
//!
//! [`jacobi`] and [`gauss_seidel`] split `A = D − L − U` and iterate
//! `x ← T·x + C` until the step error drops below the tolerance. The trace
//! keeps every iterate together with the spectral radius of `T`.

mod cholesky;
mod gaussian;
mod iterative;
mod lu;
mod matrix;

pub use cholesky::cholesky;
pub use gaussian::{pivot_gaussian_elimination, simple_gaussian_elimination};
pub use iterative::{gauss_seidel, jacobi, spectral_radius, IterativeOptions, IterativeTrace};
pub use lu::{crout, doolittle, lu_gaussian_elimination};
pub use matrix::{parse_vector, Matrix};

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

/// Message reported by every successful direct solver.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Reasons a linear solver cannot produce a solution.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinearFailure {
    /// Largest available pivot is zero
    #[error("No unique solution exists")]
    NoUniqueSolution,

    /// Unpivoted elimination met a zero pivot (1-based row)
    #[error("Zero pivot encountered at row {row}; the system has no unique solution without pivoting")]
    ZeroPivot { row: usize },

    /// A factor has a zero on its diagonal
    #[error("Error: Division by zero.")]
    DivisionByZero,

    #[error("Error: Matrix is not positive definite")]
    NotPositiveDefinite,

    #[error("Error: Matrix is not symmetric")]
    NotSymmetric,

    /// Jacobi needs an invertible diagonal
    #[error("Matrix D is singular, the method fails.")]
    SingularDiagonal,

    /// Gauss-Seidel needs an invertible lower triangle
    #[error("Matrix (D - L) is singular, the method fails.")]
    SingularLowerTriangle,

    #[error("Vector size does not match the given matrix size.")]
    VectorSize,

    /// An iterate overflowed or became NaN
    #[error("The method diverged at iteration {iteration}: the iterate is no longer finite.")]
    NonFiniteIterate { iteration: usize },

    /// Relative error of a non-zero step onto the zero vector
    #[error("The relative error is undefined at iteration {iteration} because the iterate is the zero vector.")]
    RelativeErrorUndefined { iteration: usize },
}

/// Result of a direct solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectSolution {
    pub message: String,
    pub solution: Option<Vec<f64>>,
    pub l: Option<Matrix>,
    pub u: Option<Matrix>,
}

impl DirectSolution {
    pub(crate) fn solved(method: &str, solution: Vec<f64>) -> Self {
        debug!("{}: solved {}x{} system", method, solution.len(), solution.len());
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            solution: Some(solution),
            l: None,
            u: None,
        }
    }

    pub(crate) fn factored(method: &str, solution: Vec<f64>, l: Matrix, u: Matrix) -> Self {
        Self {
            l: Some(l),
            u: Some(u),
            ..Self::solved(method, solution)
        }
    }

    pub(crate) fn failed(method: &str, failure: LinearFailure) -> Self {
        warn!("{}: {}", method, failure);
        Self {
            message: failure.to_string(),
            solution: None,
            l: None,
            u: None,
        }
    }

    /// Whether a solution was produced.
    pub fn is_success(&self) -> bool {
        self.solution.is_some()
    }
}

pub(crate) fn check_vector(a: &Matrix, b: &[f64]) -> Result<(), LinearFailure> {
    if b.len() == a.size {
        Ok(())
    } else {
        Err(LinearFailure::VectorSize)
    }
}

/// Solve `L·y = b` for lower-triangular `L` with a nonzero diagonal.
pub(crate) fn forward_substitution(l: &Matrix, b: &[f64]) -> Vec<f64> {
    let n = l.size;
    let mut y = vec![0.0; n];
    for i in 0..n {
        let sum: f64 = (0..i).map(|j| l.get(i, j) * y[j]).sum();
        y[i] = (b[i] - sum) / l.get(i, i);
    }
    y
}

/// Solve `U·x = y` for upper-triangular `U` with a nonzero diagonal.
pub(crate) fn back_substitution(u: &Matrix, y: &[f64]) -> Vec<f64> {
    let n = u.size;
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let sum: f64 = (i + 1..n).map(|j| u.get(i, j) * x[j]).sum();
        x[i] = (y[i] - sum) / u.get(i, i);
    }
    x
}

#[cfg(test)]
pub(crate) mod test_support {
    use approx::assert_abs_diff_eq;

    use super::Matrix;

    /// Assert `A·x ≈ b`.
    pub fn assert_solves(a: &Matrix, x: &[f64], b: &[f64]) {
        for (lhs, rhs) in a.mul_vec(x).iter().zip(b) {
            assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-9);
        }
    }

    /// Assert `L·U ≈ A`.
    pub fn assert_factors(a: &Matrix, l: &Matrix, u: &Matrix) {
        let product = l.mul(u);
        for (lhs, rhs) in product.as_slice().iter().zip(a.as_slice()) {
            assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-9);
        }
    }
}
