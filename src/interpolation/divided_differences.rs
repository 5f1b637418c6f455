//! Newton divided differences.

use super::{validate, Interpolation};

/// Build the divided-difference table and expand the Newton form
/// `b₀ + b₁(x − x₀) + b₂(x − x₀)(x − x₁) + …` into monomial coefficients.
pub fn newton_divided_differences(x: &[f64], y: &[f64]) -> Interpolation {
    const METHOD: &str = "Newton divided differences";

    if let Err(failure) = validate(x, y) {
        return Interpolation::failed(METHOD, failure);
    }

    let newton = divided_differences(x, y);

    // Horner on the Newton form, with coefficients lowest degree first
    let n = x.len();
    let mut poly = vec![newton[n - 1]];
    for k in (0..n - 1).rev() {
        // poly ← poly·(x − x_k) + b_k
        let mut next = vec![0.0; poly.len() + 1];
        for (i, c) in poly.iter().enumerate() {
            next[i + 1] += c;
            next[i] -= c * x[k];
        }
        next[0] += newton[k];
        poly = next;
    }
    poly.reverse();

    Interpolation::found(METHOD, poly)
}

/// Top edge of the divided-difference table: `f[x₀], f[x₀,x₁], …`.
pub fn divided_differences(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut table = y.to_vec();
    for order in 1..n {
        for i in (order..n).rev() {
            table[i] = (table[i] - table[i - 1]) / (x[i] - x[i - order]);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::interpolation::vandermonde;

    #[test]
    fn test_divided_difference_table() {
        // f = x^2 at 0, 1, 2 has f[x0] = 0, f[x0,x1] = 1, f[x0,x1,x2] = 1
        assert_eq!(divided_differences(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_agrees_with_vandermonde() {
        let x = [-1.0, 0.0, 2.0, 3.0];
        let y = [2.0, -1.0, 5.0, 14.0];
        let newton = newton_divided_differences(&x, &y);
        let direct = vandermonde(&x, &y);

        let (a, b) = (newton.coefficients.unwrap(), direct.coefficients.unwrap());
        assert_eq!(a.len(), 4);
        for (p, q) in a.iter().zip(&b) {
            assert_abs_diff_eq!(p, q, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_reproduces_points() {
        let x = [1.0, 2.0, 4.0];
        let y = [1.0, 8.0, 64.0];
        let result = newton_divided_differences(&x, &y);
        for (xi, yi) in x.iter().zip(&y) {
            assert_abs_diff_eq!(result.evaluate(*xi).unwrap(), *yi, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let result = newton_divided_differences(&[1.0, 2.0], &[1.0]);
        assert_eq!(
            result.message,
            "The X and Y values must have the same number of elements."
        );
    }
}
