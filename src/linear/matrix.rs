//! Dense square matrices.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::error::{NumetrifyError, Result};

/// Dense `n×n` matrix of `f64`, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    /// Matrix dimension
    pub size: usize,
}

impl Matrix {
    /// Zero matrix of the given size.
    pub fn zeros(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Identity matrix of the given size.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Build from rows; every row must have `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(NumetrifyError::invalid_matrix("matrix is empty"));
        }

        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(NumetrifyError::invalid_matrix(format!(
                    "row {} has {} entries, expected {} for a square matrix",
                    i + 1,
                    row.len(),
                    size
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self { data, size })
    }

    /// Parse `"4 1; 2 3"`: rows separated by `;`, entries by spaces or commas.
    pub fn parse(text: &str) -> Result<Self> {
        let rows = text
            .split(';')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .map(|row| parse_numbers(row, "matrix"))
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(&rows)
    }

    /// Get element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.size + col]
    }

    /// Set element at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] = value;
    }

    /// Add to element at (row, col).
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.size + col] += value;
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let n = self.size;
        for j in 0..n {
            self.data.swap(a * n + j, b * n + j);
        }
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Rows as owned vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.size);
        for i in 0..self.size {
            for j in 0..self.size {
                t.set(j, i, self.get(i, j));
            }
        }
        t
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (0..i).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Strict row diagonal dominance: `|a_ii| > Σ_{j≠i} |a_ij|` for every row.
    pub fn is_diagonally_dominant(&self) -> bool {
        (0..self.size).all(|i| {
            let off: f64 = (0..self.size)
                .filter(|&j| j != i)
                .map(|j| self.get(i, j).abs())
                .sum();
            self.get(i, i).abs() > off
        })
    }

    /// Matrix product.
    pub fn mul(&self, other: &Matrix) -> Matrix {
        let n = self.size;
        let mut out = Matrix::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let a = self.get(i, k);
                if a == 0.0 {
                    continue;
                }
                for j in 0..n {
                    out.add(i, j, a * other.get(k, j));
                }
            }
        }
        out
    }

    /// Matrix-vector product.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        (0..self.size)
            .map(|i| self.row(i).iter().zip(v).map(|(a, x)| a * x).sum())
            .collect()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.size + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size {
            if i > 0 {
                write!(f, "; ")?;
            }
            let row: Vec<String> = self.row(i).iter().map(|v| v.to_string()).collect();
            write!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}

/// Serialized as a list of rows.
impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for i in 0..self.size {
            seq.serialize_element(self.row(i))?;
        }
        seq.end()
    }
}

/// Parse a space- or comma-separated vector such as `"1 2 3"`.
pub fn parse_vector(text: &str) -> Result<Vec<f64>> {
    let values = parse_numbers(text, "vector")?;
    if values.is_empty() {
        return Err(NumetrifyError::InvalidNumber {
            text: text.to_string(),
            context: "vector".to_string(),
        });
    }
    Ok(values)
}

fn parse_numbers(text: &str, context: &str) -> Result<Vec<f64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(NumetrifyError::InvalidNumber {
                text: s.to_string(),
                context: context.to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let m = Matrix::parse("4 1; 2 3").unwrap();
        assert_eq!(m.size, 2);
        assert_eq!(m.get(0, 0), 4.0);
        assert_eq!(m.get(1, 0), 2.0);
        assert_eq!(m[(1, 1)], 3.0);
        assert_eq!(m.to_string(), "4 1; 2 3");

        let m = Matrix::parse("1, 2;3,4;").unwrap();
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Matrix::parse("1 2; 3"),
            Err(NumetrifyError::InvalidMatrix { .. })
        ));
        assert!(matches!(
            Matrix::parse("1 2 3; 4 5 6"),
            Err(NumetrifyError::InvalidMatrix { .. })
        ));
        assert!(matches!(
            Matrix::parse("1 a; 2 3"),
            Err(NumetrifyError::InvalidNumber { .. })
        ));
        assert!(Matrix::parse("").is_err());
        assert!(parse_vector("  ").is_err());
        assert_eq!(parse_vector("1 -2.5 3e1").unwrap(), vec![1.0, -2.5, 30.0]);
    }

    #[test]
    fn test_non_finite_entries_rejected() {
        for text in ["nan 1; 1 2", "1 inf; 1 2", "1 2; -infinity 3", "1e400 1; 1 2"] {
            assert!(
                matches!(Matrix::parse(text), Err(NumetrifyError::InvalidNumber { .. })),
                "{}",
                text
            );
        }
        assert!(matches!(
            parse_vector("nan 1"),
            Err(NumetrifyError::InvalidNumber { text, .. }) if text == "nan"
        ));
        assert!(parse_vector("1 -1e309").is_err());
    }

    #[test]
    fn test_products() {
        let a = Matrix::parse("1 2; 3 4").unwrap();
        let i = Matrix::identity(2);
        assert_eq!(a.mul(&i), a);
        assert_eq!(a.mul_vec(&[1.0, 1.0]), vec![3.0, 7.0]);
        assert_eq!(a.transpose().to_rows(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    }

    #[test]
    fn test_structure_checks() {
        assert!(Matrix::parse("2 1; 1 2").unwrap().is_symmetric());
        assert!(!Matrix::parse("2 1; 0 2").unwrap().is_symmetric());
        assert!(Matrix::parse("4 1; 2 3").unwrap().is_diagonally_dominant());
        assert!(!Matrix::parse("1 2; 3 4").unwrap().is_diagonally_dominant());
    }

    #[test]
    fn test_serialize_as_rows() {
        let m = Matrix::parse("1 2; 3 4").unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "[[1.0,2.0],[3.0,4.0]]");
    }
}
