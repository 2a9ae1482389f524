//! Numeric standardization
//!
//! Per-column mean and population standard deviation, learned once at fit
//! time and replayed as `(x - center) / scale`.

use super::matrix::Matrix;
use crate::error::Result;
use recovery_core::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scales at or below this are treated as a constant column and replaced by 1
pub const SCALE_FLOOR: f64 = 1e-8;

/// Center and scale of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub center: f64,
    pub scale: f64,
}

impl ColumnStats {
    pub fn fit(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                center: 0.0,
                scale: 1.0,
            };
        }

        let n = values.len() as f64;
        let center = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - center).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let scale = if std > SCALE_FLOOR { std } else { 1.0 };
        Self { center, scale }
    }

    pub fn apply(&self, value: f64) -> f64 {
        (value - self.center) / self.scale
    }
}

/// Statistics for every column of the fitted matrix
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericNormalizer {
    stats: BTreeMap<String, ColumnStats>,
}

impl NumericNormalizer {
    pub fn fit(matrix: &Matrix) -> Self {
        let stats = matrix
            .columns()
            .iter()
            .enumerate()
            .map(|(j, name)| (name.clone(), ColumnStats::fit(&matrix.column_values(j))))
            .collect();
        Self { stats }
    }

    pub fn stats(&self) -> &BTreeMap<String, ColumnStats> {
        &self.stats
    }

    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.stats.get(name)
    }

    /// Standardize every column; a column without statistics is an error
    pub fn transform(&self, matrix: &Matrix) -> Result<Matrix> {
        let stats: Vec<&ColumnStats> = matrix
            .columns()
            .iter()
            .map(|name| {
                self.stats
                    .get(name)
                    .ok_or_else(|| CoreError::FieldNotFound(name.clone()))
            })
            .collect::<std::result::Result<_, _>>()?;

        let rows = matrix
            .rows()
            .iter()
            .map(|row| row.iter().zip(&stats).map(|(v, s)| s.apply(*v)).collect())
            .collect();
        Matrix::new(matrix.columns().to_vec(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_column_uses_unit_scale() {
        let stats = ColumnStats::fit(&[5.0, 5.0, 5.0]);
        assert_eq!(stats.center, 5.0);
        assert_eq!(stats.scale, 1.0);
        assert_eq!(stats.apply(5.0), 0.0);
    }

    #[test]
    fn test_population_std() {
        let stats = ColumnStats::fit(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.center, 5.0);
        assert_eq!(stats.scale, 2.0);
    }

    #[test]
    fn test_transform_requires_known_columns() {
        let fit = Matrix::new(vec!["a".into()], vec![vec![1.0], vec![3.0]]).unwrap();
        let normalizer = NumericNormalizer::fit(&fit);

        let other = Matrix::new(vec!["b".into()], vec![vec![1.0]]).unwrap();
        assert!(normalizer.transform(&other).is_err());

        let out = normalizer.transform(&fit).unwrap();
        assert_eq!(out.column_values(0), vec![-1.0, 1.0]);
    }
}
