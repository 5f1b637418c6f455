//! LU factorizations: Gaussian multipliers, Doolittle and Crout.

use super::{back_substitution, check_vector, forward_substitution, DirectSolution, LinearFailure, Matrix};

/// LU factorization by Gaussian elimination.
///
/// `U` is the reduced matrix and `L` holds the elimination multipliers
/// below a unit diagonal.
pub fn lu_gaussian_elimination(a: &Matrix, b: &[f64]) -> DirectSolution {
    const METHOD: &str = "LU Gaussian elimination";

    if let Err(failure) = check_vector(a, b) {
        return DirectSolution::failed(METHOD, failure);
    }

    let n = a.size;
    let mut l = Matrix::identity(n);
    let mut u = a.clone();

    for k in 0..n {
        let pivot = u.get(k, k);
        if pivot == 0.0 {
            return DirectSolution::failed(METHOD, LinearFailure::DivisionByZero);
        }
        for i in (k + 1)..n {
            let multiplier = u.get(i, k) / pivot;
            l.set(i, k, multiplier);
            for j in k..n {
                let value = u.get(k, j);
                u.add(i, j, -multiplier * value);
            }
            u.set(i, k, 0.0);
        }
    }

    solve_factored(METHOD, b, l, u)
}

/// Doolittle factorization: unit-lower `L`, upper `U`.
///
/// ```text
/// U[i][k] = A[i][k] − Σ_{j<i} L[i][j]·U[j][k]      k ≥ i
/// L[k][i] = (A[k][i] − Σ_{j<i} L[k][j]·U[j][i]) / U[i][i]      k > i
/// ```
pub fn doolittle(a: &Matrix, b: &[f64]) -> DirectSolution {
    const METHOD: &str = "Doolittle";

    if let Err(failure) = check_vector(a, b) {
        return DirectSolution::failed(METHOD, failure);
    }

    let n = a.size;
    let mut l = Matrix::identity(n);
    let mut u = Matrix::zeros(n);

    for i in 0..n {
        for k in i..n {
            let sum: f64 = (0..i).map(|j| l.get(i, j) * u.get(j, k)).sum();
            u.set(i, k, a.get(i, k) - sum);
        }

        if u.get(i, i) == 0.0 {
            return DirectSolution::failed(METHOD, LinearFailure::DivisionByZero);
        }

        for k in (i + 1)..n {
            let sum: f64 = (0..i).map(|j| l.get(k, j) * u.get(j, i)).sum();
            l.set(k, i, (a.get(k, i) - sum) / u.get(i, i));
        }
    }

    solve_factored(METHOD, b, l, u)
}

/// Crout factorization: lower `L`, unit-upper `U`.
pub fn crout(a: &Matrix, b: &[f64]) -> DirectSolution {
    const METHOD: &str = "Crout";

    if let Err(failure) = check_vector(a, b) {
        return DirectSolution::failed(METHOD, failure);
    }

    let n = a.size;
    let mut l = Matrix::zeros(n);
    let mut u = Matrix::identity(n);

    for j in 0..n {
        for i in j..n {
            let sum: f64 = (0..j).map(|k| l.get(i, k) * u.get(k, j)).sum();
            l.set(i, j, a.get(i, j) - sum);
        }

        if l.get(j, j) == 0.0 {
            return DirectSolution::failed(METHOD, LinearFailure::DivisionByZero);
        }

        for i in (j + 1)..n {
            let sum: f64 = (0..j).map(|k| l.get(j, k) * u.get(k, i)).sum();
            u.set(j, i, (a.get(j, i) - sum) / l.get(j, j));
        }
    }

    solve_factored(METHOD, b, l, u)
}

/// Forward then back substitution through `L·U`. Both diagonals are
/// already known to be nonzero.
fn solve_factored(method: &str, b: &[f64], l: Matrix, u: Matrix) -> DirectSolution {
    let y = forward_substitution(&l, b);
    let x = back_substitution(&u, &y);
    DirectSolution::factored(method, x, l, u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::test_support::{assert_factors, assert_solves};

    fn system() -> (Matrix, Vec<f64>) {
        let a = Matrix::parse("4 3 -2; 2 5 1; -1 2 6").unwrap();
        (a, vec![7.0, 13.0, 17.0])
    }

    #[test]
    fn test_lu_gaussian() {
        let (a, b) = system();
        let result = lu_gaussian_elimination(&a, &b);
        let (l, u) = (result.l.clone().unwrap(), result.u.clone().unwrap());
        assert_factors(&a, &l, &u);
        assert_solves(&a, &result.solution.unwrap(), &b);
        assert_eq!(l.get(0, 0), 1.0);
        assert_eq!(u.get(2, 0), 0.0);
    }

    #[test]
    fn test_doolittle_matches_lu_gaussian() {
        let (a, b) = system();
        let d = doolittle(&a, &b);
        let g = lu_gaussian_elimination(&a, &b);
        assert_factors(&a, d.l.as_ref().unwrap(), d.u.as_ref().unwrap());
        assert_solves(&a, d.solution.as_ref().unwrap(), &b);
        for (x, y) in d.l.unwrap().as_slice().iter().zip(g.l.unwrap().as_slice()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_crout_has_unit_upper() {
        let (a, b) = system();
        let result = crout(&a, &b);
        let (l, u) = (result.l.clone().unwrap(), result.u.clone().unwrap());
        assert_factors(&a, &l, &u);
        assert_solves(&a, &result.solution.unwrap(), &b);
        for i in 0..3 {
            assert_eq!(u.get(i, i), 1.0);
        }
        assert_eq!(l.get(0, 2), 0.0);
    }

    #[test]
    fn test_zero_pivot_is_division_by_zero() {
        let a = Matrix::parse("0 1; 1 0").unwrap();
        for result in [
            lu_gaussian_elimination(&a, &[1.0, 1.0]),
            doolittle(&a, &[1.0, 1.0]),
            crout(&a, &[1.0, 1.0]),
        ] {
            assert_eq!(result.message, "Error: Division by zero.");
            assert_eq!(result.solution, None);
            assert_eq!(result.l, None);
        }
    }

    #[test]
    fn test_singular_trailing_pivot() {
        let a = Matrix::parse("1 2; 2 4").unwrap();
        assert_eq!(doolittle(&a, &[1.0, 2.0]).message, "Error: Division by zero.");
        assert_eq!(
            lu_gaussian_elimination(&a, &[1.0, 2.0]).message,
            "Error: Division by zero."
        );
    }
}
