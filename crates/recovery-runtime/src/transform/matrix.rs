//! Row-major numeric matrix handed to classifiers

use crate::error::{Result, RuntimeError};
use serde::{Deserialize, Serialize};

/// Dense numeric matrix with named columns
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Matrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    /// Build a matrix, checking every row against the column count
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(RuntimeError::DimensionMismatch {
                expected: columns.len(),
                actual: row.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Build a matrix from column vectors of `n_rows` values each
    pub fn from_columns(columns: Vec<String>, values: Vec<Vec<f64>>, n_rows: usize) -> Result<Self> {
        if values.len() != columns.len() {
            return Err(RuntimeError::DimensionMismatch {
                expected: columns.len(),
                actual: values.len(),
            });
        }
        if let Some(column) = values.iter().find(|v| v.len() != n_rows) {
            return Err(RuntimeError::DimensionMismatch {
                expected: n_rows,
                actual: column.len(),
            });
        }

        let rows = (0..n_rows)
            .map(|i| values.iter().map(|column| column[i]).collect())
            .collect();
        Ok(Self { columns, rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }

    /// Keep only the given rows, in the given order
    pub fn select_rows(&self, indices: &[usize]) -> Matrix {
        Matrix {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Fail on the first NaN or infinite cell
    pub fn ensure_finite(&self) -> Result<()> {
        for row in &self.rows {
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(RuntimeError::NonFiniteInput {
                    column: self.columns[j].clone(),
                });
            }
        }
        Ok(())
    }

    /// Fail unless the matrix has exactly `expected` columns
    pub fn ensure_width(&self, expected: usize) -> Result<()> {
        if self.n_cols() != expected {
            return Err(RuntimeError::DimensionMismatch {
                expected,
                actual: self.n_cols(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = Matrix::new(names(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, RuntimeError::DimensionMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn test_from_columns_transposes() {
        let m = Matrix::from_columns(
            names(&["a", "b"]),
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
            3,
        )
        .unwrap();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.row(1), Some(&[2.0, 5.0][..]));
        assert_eq!(m.column_values(1), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_ensure_finite_names_column() {
        let m = Matrix::new(names(&["a", "b"]), vec![vec![1.0, f64::NAN]]).unwrap();
        assert_eq!(
            m.ensure_finite().unwrap_err(),
            RuntimeError::NonFiniteInput { column: "b".to_string() }
        );
    }

    #[test]
    fn test_ensure_width() {
        let m = Matrix::new(names(&["a"]), vec![vec![1.0]]).unwrap();
        assert!(m.ensure_width(1).is_ok());
        assert!(m.ensure_width(2).is_err());
    }
}
