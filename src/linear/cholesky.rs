//! Cholesky factorization.

use super::{back_substitution, check_vector, forward_substitution, DirectSolution, LinearFailure, Matrix};

/// Cholesky factorization `A = L·Lᵗ` of a symmetric positive-definite matrix.
///
/// Fails when `A` is not symmetric or when a diagonal Schur complement is
/// not strictly positive.
pub fn cholesky(a: &Matrix, b: &[f64]) -> DirectSolution {
    const METHOD: &str = "Cholesky";

    if let Err(failure) = check_vector(a, b) {
        return DirectSolution::failed(METHOD, failure);
    }
    if !a.is_symmetric() {
        return DirectSolution::failed(METHOD, LinearFailure::NotSymmetric);
    }

    let n = a.size;
    let mut l = Matrix::zeros(n);

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l.get(i, k) * l.get(j, k)).sum();
            if i == j {
                let pivot = a.get(i, i) - sum;
                if pivot <= 0.0 {
                    return DirectSolution::failed(METHOD, LinearFailure::NotPositiveDefinite);
                }
                l.set(i, j, pivot.sqrt());
            } else {
                l.set(i, j, (a.get(i, j) - sum) / l.get(j, j));
            }
        }
    }

    let u = l.transpose();
    let y = forward_substitution(&l, b);
    let x = back_substitution(&u, &y);
    DirectSolution::factored(METHOD, x, l, u)
}
