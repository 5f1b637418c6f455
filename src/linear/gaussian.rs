//! Gaussian elimination, with and without pivoting.

use super::{check_vector, DirectSolution, LinearFailure, Matrix};

/// Unpivoted elimination followed by back substitution.
///
/// Rows whose entry below the pivot is already zero are left alone. A zero
/// pivot that would be divided by is reported instead of producing `inf`.
pub fn simple_gaussian_elimination(a: &Matrix, b: &[f64]) -> DirectSolution {
    const METHOD: &str = "simple Gaussian elimination";

    if let Err(failure) = check_vector(a, b) {
        return DirectSolution::failed(METHOD, failure);
    }

    let n = a.size;
    let mut m = a.clone();
    let mut rhs = b.to_vec();

    for i in 0..n.saturating_sub(1) {
        for j in (i + 1)..n {
            if m.get(j, i) == 0.0 {
                continue;
            }
            let pivot = m.get(i, i);
            if pivot == 0.0 {
                return DirectSolution::failed(METHOD, LinearFailure::ZeroPivot { row: i + 1 });
            }

            let factor = m.get(j, i) / pivot;
            for k in i..n {
                let value = m.get(i, k);
                m.add(j, k, -factor * value);
            }
            rhs[j] -= factor * rhs[i];
        }
    }

    if let Some(i) = (0..n).find(|&i| m.get(i, i) == 0.0) {
        return DirectSolution::failed(METHOD, LinearFailure::ZeroPivot { row: i + 1 });
    }

    DirectSolution::solved(METHOD, super::back_substitution(&m, &rhs))
}

/// Gauss-Jordan elimination with partial pivoting.
///
/// At column `i` the row with the largest `|a_ki|`, `k ≥ i`, is swapped in,
/// normalized to a unit pivot and eliminated from every other row.
pub fn pivot_gaussian_elimination(a: &Matrix, b: &[f64]) -> DirectSolution {
    const METHOD: &str = "pivot Gaussian elimination";

    if let Err(failure) = check_vector(a, b) {
        return DirectSolution::failed(METHOD, failure);
    }

    let n = a.size;
    let mut m = a.clone();
    let mut rhs = b.to_vec();

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if m.get(k, i).abs() > m.get(max_row, i).abs() {
                max_row = k;
            }
        }
        m.swap_rows(i, max_row);
        rhs.swap(i, max_row);

        let pivot = m.get(i, i);
        if pivot == 0.0 {
            return DirectSolution::failed(METHOD, LinearFailure::NoUniqueSolution);
        }

        for k in 0..n {
            m[(i, k)] /= pivot;
        }
        rhs[i] /= pivot;

        for j in (0..n).filter(|&j| j != i) {
            let factor = m.get(j, i);
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                let value = m.get(i, k);
                m.add(j, k, -factor * value);
            }
            rhs[j] -= factor * rhs[i];
        }
    }

    DirectSolution::solved(METHOD, rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear::test_support::assert_solves;

    #[test]
    fn test_simple_solves_system() {
        let a = Matrix::parse("2 1 -1; -3 -1 2; -2 1 2").unwrap();
        let b = [8.0, -11.0, -3.0];
        let result = simple_gaussian_elimination(&a, &b);
        assert_eq!(result.message, "Success");
        let x = result.solution.unwrap();
        assert_solves(&a, &x, &b);
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert!((x[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_simple_reports_zero_pivot() {
        let a = Matrix::parse("0 1; 1 1").unwrap();
        let result = simple_gaussian_elimination(&a, &[1.0, 2.0]);
        assert_eq!(result.solution, None);
        assert!(result.message.starts_with("Zero pivot encountered at row 1"));
    }

    #[test]
    fn test_simple_reports_singular_last_pivot() {
        let a = Matrix::parse("1 2; 2 4").unwrap();
        let result = simple_gaussian_elimination(&a, &[1.0, 2.0]);
        assert_eq!(result.solution, None);
        assert!(result.message.contains("row 2"));
    }

    #[test]
    fn test_pivot_handles_zero_leading_entry() {
        let a = Matrix::parse("0 1; 1 1").unwrap();
        let b = [1.0, 2.0];
        let result = pivot_gaussian_elimination(&a, &b);
        let x = result.solution.unwrap();
        assert_solves(&a, &x, &b);
        // caller's matrix is untouched
        assert_eq!(a.get(0, 0), 0.0);
    }

    #[test]
    fn test_pivot_singular() {
        let a = Matrix::parse("1 2; 2 4").unwrap();
        let result = pivot_gaussian_elimination(&a, &[1.0, 2.0]);
        assert_eq!(result.message, "No unique solution exists");
        assert_eq!(result.solution, None);
    }

    #[test]
    fn test_vector_size_mismatch() {
        let a = Matrix::parse("1 0; 0 1").unwrap();
        let result = pivot_gaussian_elimination(&a, &[1.0]);
        assert_eq!(result.message, "Vector size does not match the given matrix size.");
    }
}
