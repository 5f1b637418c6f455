//! Stationary iterative solvers: Jacobi and Gauss-Seidel.

use log::{debug, trace, warn};
use nalgebra::linalg::Schur;
use nalgebra::DMatrix;
use serde::Serialize;

use super::{check_vector, forward_substitution, LinearFailure, Matrix};
use crate::numeric::ErrorType;
use crate::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE_DIGITS};

/// Sweeps allowed for the Schur iteration behind [`spectral_radius`].
const SCHUR_MAX_ITERATIONS: usize = 10_000;

/// Options for the iterative solvers.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeOptions {
    pub error_type: ErrorType,
    pub tolerance_digits: f64,
    pub max_iterations: usize,
}

impl Default for IterativeOptions {
    fn default() -> Self {
        Self {
            error_type: ErrorType::Absolute,
            tolerance_digits: DEFAULT_TOLERANCE_DIGITS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IterativeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = error_type;
        self
    }

    pub fn with_tolerance_digits(mut self, digits: f64) -> Self {
        self.tolerance_digits = digits;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// `0.5×10^−t` for absolute errors, `5×10^−t` for relative ones.
    pub fn tolerance(&self) -> f64 {
        self.error_type.iterative_tolerance(self.tolerance_digits)
    }
}

/// Trace of an iterative solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterativeTrace {
    pub message: String,
    /// Every iterate, starting with `x0`.
    #[serde(rename = "xvalues")]
    pub x_values: Vec<Vec<f64>>,
    /// Step error of each iterate after `x0`.
    pub errors: Vec<f64>,
    /// `ρ(T)`, absent when the method stopped before building `T`.
    pub spectral_radius: Option<f64>,
    pub diagonally_dominant: bool,
    pub converged: bool,
}

impl IterativeTrace {
    fn rejected(method: &str, a: &Matrix, failure: LinearFailure) -> Self {
        warn!("{}: {}", method, failure);
        Self {
            message: failure.to_string(),
            x_values: Vec::new(),
            errors: Vec::new(),
            spectral_radius: None,
            diagonally_dominant: a.is_diagonally_dominant(),
            converged: false,
        }
    }

    /// Number of iterations performed.
    pub fn iterations(&self) -> usize {
        self.errors.len()
    }

    /// Last iterate, if the method ran.
    pub fn solution(&self) -> Option<&[f64]> {
        if self.converged {
            self.x_values.last().map(Vec::as_slice)
        } else {
            None
        }
    }
}

/// Jacobi iteration: `T = D⁻¹(L + U)`, `C = D⁻¹b`.
pub fn jacobi(a: &Matrix, b: &[f64], x0: &[f64], options: &IterativeOptions) -> IterativeTrace {
    const METHOD: &str = "Jacobi";

    if check_vector(a, b).and(check_vector(a, x0)).is_err() {
        return IterativeTrace::rejected(METHOD, a, LinearFailure::VectorSize);
    }

    let n = a.size;
    if (0..n).any(|i| a.get(i, i) == 0.0) {
        return IterativeTrace::rejected(METHOD, a, LinearFailure::SingularDiagonal);
    }

    let mut t = Matrix::zeros(n);
    let mut c = vec![0.0; n];
    for i in 0..n {
        let d = a.get(i, i);
        for j in (0..n).filter(|&j| j != i) {
            t.set(i, j, -a.get(i, j) / d);
        }
        c[i] = b[i] / d;
    }

    iterate(METHOD, a, &t, &c, x0, options)
}

/// Gauss-Seidel iteration: `T = (D − L)⁻¹U`, `C = (D − L)⁻¹b`.
pub fn gauss_seidel(a: &Matrix, b: &[f64], x0: &[f64], options: &IterativeOptions) -> IterativeTrace {
    const METHOD: &str = "Gauss-Seidel";

    if check_vector(a, b).and(check_vector(a, x0)).is_err() {
        return IterativeTrace::rejected(METHOD, a, LinearFailure::VectorSize);
    }

    let n = a.size;
    // D - L is the lower triangle of A; it is singular iff a diagonal entry is zero
    if (0..n).any(|i| a.get(i, i) == 0.0) {
        return IterativeTrace::rejected(METHOD, a, LinearFailure::SingularLowerTriangle);
    }

    let mut lower = Matrix::zeros(n);
    let mut upper = Matrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            if j <= i {
                lower.set(i, j, a.get(i, j));
            } else {
                upper.set(i, j, -a.get(i, j));
            }
        }
    }

    // Column j of T solves (D - L)·t = U[:, j]
    let mut t = Matrix::zeros(n);
    for j in 0..n {
        let column: Vec<f64> = (0..n).map(|i| upper.get(i, j)).collect();
        for (i, value) in forward_substitution(&lower, &column).into_iter().enumerate() {
            t.set(i, j, value);
        }
    }
    let c = forward_substitution(&lower, b);

    iterate(METHOD, a, &t, &c, x0, options)
}

fn iterate(
    method: &str,
    a: &Matrix,
    t: &Matrix,
    c: &[f64],
    x0: &[f64],
    options: &IterativeOptions,
) -> IterativeTrace {
    let tolerance = options.tolerance();
    let mut x = x0.to_vec();
    let mut x_values = vec![x.clone()];
    let mut errors = Vec::new();
    let mut error = f64::INFINITY;
    let mut failure = None;

    while error >= tolerance && errors.len() < options.max_iterations {
        let iteration = errors.len() + 1;
        let next: Vec<f64> = t.mul_vec(&x).iter().zip(c).map(|(tx, ci)| tx + ci).collect();
        error = match options.error_type.vector_error(&next, &x) {
            Some(error) if error.is_finite() && next.iter().all(|v| v.is_finite()) => error,
            Some(_) => {
                failure = Some(LinearFailure::NonFiniteIterate { iteration });
                break;
            }
            None => {
                failure = Some(LinearFailure::RelativeErrorUndefined { iteration });
                break;
            }
        };
        trace!("{}: iteration {} error = {}", method, iteration, error);

        errors.push(error);
        x_values.push(next.clone());
        x = next;
    }

    let rho = spectral_radius(t);
    let diagonally_dominant = a.is_diagonally_dominant();
    let converged = failure.is_none() && error < tolerance;

    let mut message = match failure {
        Some(failure) => {
            warn!("{}: {}", method, failure);
            failure.to_string()
        }
        None if converged => format!(
            "The approximate solution is: {:?}, with a tolerance = {}",
            x, tolerance
        ),
        None => format!("Failed in {} iterations.", options.max_iterations),
    };

    match rho {
        Some(rho) if converged && rho < 1.0 => message.push_str(&format!(
            " This solution is unique because the spectral radius of T is {} and is less than 1.",
            rho
        )),
        Some(rho) if !converged && rho >= 1.0 => message.push_str(&format!(
            " It is possible that the method failed because the spectral radius of T is {} and is greater than or equal to 1.",
            rho
        )),
        _ if !converged && !diagonally_dominant => {
            message.push_str(" It is possible that the method failed because A is not diagonally dominant.")
        }
        _ => {}
    }

    debug!("{}: {}", method, message);

    IterativeTrace {
        message,
        x_values,
        errors,
        spectral_radius: rho,
        diagonally_dominant,
        converged,
    }
}

/// Largest eigenvalue modulus of a square matrix.
///
/// `None` when the Schur iteration does not converge.
pub fn spectral_radius(m: &Matrix) -> Option<f64> {
    let dense = DMatrix::from_row_slice(m.size, m.size, m.as_slice());
    let schur = Schur::try_new(dense, f64::EPSILON, SCHUR_MAX_ITERATIONS)?;
    Some(
        schur
            .complex_eigenvalues()
            .iter()
            .map(|z| z.norm())
            .fold(0.0, f64::max),
    )
}
