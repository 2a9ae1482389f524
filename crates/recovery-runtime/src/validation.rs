//! Training data validation
//!
//! Checks a canonical training frame before anything is fitted on it.
//!
//! # Checks
//!
//! ## Class balance
//!
//! Counts recovered and not-recovered rows (unlabeled rows are reported
//! separately and excluded). The set is balanced when the smaller class
//! reaches `min_class_proportion` of the labelled rows. Imbalance is logged
//! as a warning, not an error.
//!
//! ## Extreme values
//!
//! Any numeric cell with magnitude above [`EXTREME_VALUE_LIMIT`] is reported
//! by column. Such values usually come from unit mistakes in the source and
//! dominate the normalizer statistics.
//!
//! ## Non-finite values
//!
//! NaN or infinite numbers are fatal: the frame is rejected with
//! `RuntimeError::NonFiniteInput` naming the first offending column.

use crate::error::{Result, RuntimeError};
use recovery_core::{Frame, Value, TARGET_COLUMN};
use serde::{Deserialize, Serialize};

/// Magnitude above which a numeric value is reported as extreme
pub const EXTREME_VALUE_LIMIT: f64 = 1e10;

/// Label distribution of a training frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBalance {
    pub recovered: usize,
    pub not_recovered: usize,
    pub recovered_proportion: f64,
    pub not_recovered_proportion: f64,
    pub is_balanced: bool,
}

impl ClassBalance {
    pub fn from_labels(labels: &[u8], min_class_proportion: f64) -> Self {
        let recovered = labels.iter().filter(|l| **l == 1).count();
        let not_recovered = labels.len() - recovered;
        let total = labels.len().max(1) as f64;
        let recovered_proportion = recovered as f64 / total;
        let not_recovered_proportion = not_recovered as f64 / total;

        Self {
            recovered,
            not_recovered,
            recovered_proportion,
            not_recovered_proportion,
            is_balanced: recovered_proportion.min(not_recovered_proportion)
                >= min_class_proportion,
        }
    }
}

/// Findings of [`validate_training_frame`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub rows: usize,
    pub unlabeled_rows: usize,
    pub class_balance: ClassBalance,
    pub extreme_value_columns: Vec<String>,
}

/// Validate a labelled training frame
pub fn validate_training_frame(frame: &Frame, min_class_proportion: f64) -> Result<DataQualityReport> {
    let target = frame
        .column(TARGET_COLUMN)
        .ok_or_else(|| RuntimeError::MissingTarget(TARGET_COLUMN.to_string()))?;

    let labels: Vec<u8> = target
        .values
        .iter()
        .filter_map(Value::as_f64)
        .filter(|t| *t == 0.0 || *t == 1.0)
        .map(|t| t as u8)
        .collect();
    let unlabeled_rows = frame.n_rows() - labels.len();

    let class_balance = ClassBalance::from_labels(&labels, min_class_proportion);
    if !class_balance.is_balanced {
        tracing::warn!(
            recovered = class_balance.recovered,
            not_recovered = class_balance.not_recovered,
            min_class_proportion,
            "Training classes are imbalanced"
        );
    }

    ensure_finite_frame(frame)?;

    let extreme_value_columns = extreme_value_columns(frame);
    for column in &extreme_value_columns {
        tracing::warn!(column = %column, limit = EXTREME_VALUE_LIMIT, "Extreme values in column");
    }

    Ok(DataQualityReport {
        rows: frame.n_rows(),
        unlabeled_rows,
        class_balance,
        extreme_value_columns,
    })
}

/// Columns holding at least one value beyond [`EXTREME_VALUE_LIMIT`]
pub fn extreme_value_columns(frame: &Frame) -> Vec<String> {
    frame
        .columns()
        .iter()
        .filter(|column| {
            column
                .values
                .iter()
                .filter_map(Value::as_f64)
                .any(|v| v.abs() > EXTREME_VALUE_LIMIT)
        })
        .map(|column| column.name.clone())
        .collect()
}

/// Reject NaN and infinite numbers anywhere in the frame
pub fn ensure_finite_frame(frame: &Frame) -> Result<()> {
    for column in frame.columns() {
        let non_finite = column
            .values
            .iter()
            .any(|v| matches!(v, Value::Number(n) if !n.is_finite()));
        if non_finite {
            return Err(RuntimeError::NonFiniteInput {
                column: column.name.clone(),
            });
        }
    }
    Ok(())
}
