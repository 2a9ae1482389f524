//! Transform artifact
//!
//! The artifact binds the fitted encoder, normalizer and feature order
//! together. It is produced by a single [`TransformArtifact::fit`] pass over
//! a labelled training frame and replayed unchanged by
//! [`TransformArtifact::transform`] for every serving frame.

use super::aligner::align;
use super::encoder::CategoricalEncoder;
use super::matrix::Matrix;
use super::normalizer::NumericNormalizer;
use crate::error::{Result, RuntimeError};
use recovery_core::{Frame, Value, TARGET_COLUMN};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fitted preprocessing state shared by training and serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformArtifact {
    ordered_feature_names: Vec<String>,
    categorical_code_tables: CategoricalEncoder,
    numeric_stats: NumericNormalizer,
    /// Training medians used for missing numeric cells
    fill_values: BTreeMap<String, f64>,
}

/// Output of fitting an artifact
#[derive(Debug, Clone)]
pub struct TransformFit {
    pub artifact: TransformArtifact,
    /// Normalized training matrix, one row per labelled record
    pub matrix: Matrix,
    /// Outcome per matrix row: 1 recovered, 0 not recovered
    pub labels: Vec<u8>,
}

impl TransformArtifact {
    /// Fit on a frame carrying the label column.
    ///
    /// Rows without a 0/1 label are excluded. Every other column becomes a
    /// feature, in frame order.
    pub fn fit(frame: &Frame) -> Result<TransformFit> {
        let target = frame
            .column(TARGET_COLUMN)
            .ok_or_else(|| RuntimeError::MissingTarget(TARGET_COLUMN.to_string()))?;

        let mut keep = Vec::with_capacity(frame.n_rows());
        let mut labels = Vec::with_capacity(frame.n_rows());
        for (i, value) in target.values.iter().enumerate() {
            match value.as_f64() {
                Some(t) if t == 1.0 => {
                    keep.push(i);
                    labels.push(1u8);
                }
                Some(t) if t == 0.0 => {
                    keep.push(i);
                    labels.push(0u8);
                }
                _ => {}
            }
        }

        let unlabeled = frame.n_rows() - keep.len();
        if unlabeled > 0 {
            tracing::warn!(unlabeled, "Excluding unlabeled rows from fit");
        }
        if keep.is_empty() {
            return Err(RuntimeError::EmptyTrainingSet);
        }

        let labeled = frame.select_rows(&keep);
        let ordered_feature_names: Vec<String> = labeled
            .column_names()
            .into_iter()
            .filter(|name| *name != TARGET_COLUMN)
            .map(str::to_string)
            .collect();

        let encoder = CategoricalEncoder::fit(&labeled, &ordered_feature_names);
        let encoded = encoder.transform(&labeled)?;

        let mut fill_values = BTreeMap::new();
        for name in &ordered_feature_names {
            let present: Vec<f64> = match encoded.column(name) {
                Some(column) => column.values.iter().filter_map(Value::as_f64).collect(),
                None => Vec::new(),
            };
            fill_values.insert(name.clone(), median(present).unwrap_or(0.0));
        }

        let raw = numeric_matrix(&encoded, &ordered_feature_names, &fill_values)?;
        let normalizer = NumericNormalizer::fit(&raw);
        let matrix = normalizer.transform(&raw)?;
        matrix.ensure_finite()?;

        tracing::info!(
            rows = matrix.n_rows(),
            features = ordered_feature_names.len(),
            categorical = encoder.tables().len(),
            "Fitted transform artifact"
        );

        Ok(TransformFit {
            artifact: Self {
                ordered_feature_names,
                categorical_code_tables: encoder,
                numeric_stats: normalizer,
                fill_values,
            },
            matrix,
            labels,
        })
    }

    /// Replay the fitted transforms on a serving or evaluation frame
    pub fn transform(&self, frame: &Frame) -> Result<Matrix> {
        let aligned = align(frame, &self.ordered_feature_names);
        let encoded = self.categorical_code_tables.transform(&aligned)?;
        let raw = numeric_matrix(&encoded, &self.ordered_feature_names, &self.fill_values)?;
        let matrix = self.numeric_stats.transform(&raw)?;
        matrix.ensure_finite()?;
        Ok(matrix)
    }

    pub fn ordered_feature_names(&self) -> &[String] {
        &self.ordered_feature_names
    }

    pub fn num_features(&self) -> usize {
        self.ordered_feature_names.len()
    }

    pub fn encoder(&self) -> &CategoricalEncoder {
        &self.categorical_code_tables
    }

    pub fn normalizer(&self) -> &NumericNormalizer {
        &self.numeric_stats
    }

    pub fn fill_values(&self) -> &BTreeMap<String, f64> {
        &self.fill_values
    }
}

/// Dense matrix of the named columns.
///
/// Missing cells take the column's fill value; a non-finite number is an
/// error rather than being imputed.
fn numeric_matrix(
    frame: &Frame,
    names: &[String],
    fill_values: &BTreeMap<String, f64>,
) -> Result<Matrix> {
    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let fill = fill_values.get(name).copied().unwrap_or(0.0);
        let values = match frame.column(name) {
            Some(column) => column
                .values
                .iter()
                .map(|cell| match cell {
                    Value::Number(n) if !n.is_finite() => Err(RuntimeError::NonFiniteInput {
                        column: name.clone(),
                    }),
                    other => Ok(other.as_f64().unwrap_or(fill)),
                })
                .collect::<Result<Vec<f64>>>()?,
            None => vec![fill; frame.n_rows()],
        };
        columns.push(values);
    }
    Matrix::from_columns(names.to_vec(), columns, frame.n_rows())
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
