//! Risk classifiers
//!
//! Classifiers are consumed through the [`Classifier`] trait only. The
//! concrete variants are selected from configuration through
//! [`ClassifierConfig`] and persisted as [`ClassifierModel`].

pub mod boosting;
pub mod evaluation;
pub mod logistic;
pub mod metadata;
pub mod split;

pub use boosting::{BoostingParams, GradientBoostedStumps};
pub use evaluation::{evaluate, EvaluationMetrics};
pub use logistic::{LogisticParams, LogisticRegression};
pub use metadata::TrainingMetadata;
pub use split::{stratified_split, TrainTestSplit};

use crate::error::{Result, RuntimeError};
use crate::transform::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability mass per outcome for one row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub not_recovered: f64,
    pub recovered: f64,
}

impl ClassProbabilities {
    /// Both outcomes from the recovered probability; rejects values outside [0, 1]
    pub fn from_recovered(recovered: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&recovered) {
            return Err(RuntimeError::InvalidProbability(recovered));
        }
        Ok(Self {
            not_recovered: 1.0 - recovered,
            recovered,
        })
    }
}

/// Binary probability model over the aligned numeric matrix
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Short model name recorded in training metadata
    fn name(&self) -> &str;

    /// Fit on a normalized matrix and one 0/1 label per row
    fn fit(&mut self, x: &Matrix, y: &[u8]) -> Result<()>;

    /// Class probabilities per row, in row order
    fn predict_proba(&self, x: &Matrix) -> Result<Vec<ClassProbabilities>>;
}

/// Classifier selection and hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierConfig {
    LogisticRegression(LogisticParams),
    GradientBoosting(BoostingParams),
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig::GradientBoosting(BoostingParams::default())
    }
}

impl ClassifierConfig {
    /// Unfitted classifier for this configuration
    pub fn build(&self) -> ClassifierModel {
        match self {
            ClassifierConfig::LogisticRegression(params) => {
                ClassifierModel::LogisticRegression(LogisticRegression::new(params.clone()))
            }
            ClassifierConfig::GradientBoosting(params) => {
                ClassifierModel::GradientBoosting(GradientBoostedStumps::new(params.clone()))
            }
        }
    }
}

/// Persistable classifier variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    LogisticRegression(LogisticRegression),
    GradientBoosting(GradientBoostedStumps),
}

impl Classifier for ClassifierModel {
    fn name(&self) -> &str {
        match self {
            ClassifierModel::LogisticRegression(m) => m.name(),
            ClassifierModel::GradientBoosting(m) => m.name(),
        }
    }

    fn fit(&mut self, x: &Matrix, y: &[u8]) -> Result<()> {
        match self {
            ClassifierModel::LogisticRegression(m) => m.fit(x, y),
            ClassifierModel::GradientBoosting(m) => m.fit(x, y),
        }
    }

    fn predict_proba(&self, x: &Matrix) -> Result<Vec<ClassProbabilities>> {
        match self {
            ClassifierModel::LogisticRegression(m) => m.predict_proba(x),
            ClassifierModel::GradientBoosting(m) => m.predict_proba(x),
        }
    }
}

/// Check labels against the matrix and require both outcomes
pub(crate) fn check_training_input(x: &Matrix, y: &[u8]) -> Result<()> {
    if x.n_rows() != y.len() {
        return Err(RuntimeError::DimensionMismatch {
            expected: x.n_rows(),
            actual: y.len(),
        });
    }
    if x.n_rows() == 0 {
        return Err(RuntimeError::EmptyTrainingSet);
    }
    x.ensure_finite()?;
    let first = y[0];
    if y.iter().all(|label| *label == first) {
        return Err(RuntimeError::SingleClass(first));
    }
    Ok(())
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_reject_out_of_range() {
        assert!(ClassProbabilities::from_recovered(0.72).is_ok());
        assert_eq!(
            ClassProbabilities::from_recovered(1.5).unwrap_err(),
            RuntimeError::InvalidProbability(1.5)
        );
        assert!(ClassProbabilities::from_recovered(f64::NAN).is_err());
    }

    #[test]
    fn test_sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(-1000.0).is_finite());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config: ClassifierConfig =
            serde_json::from_str(r#"{"kind": "logistic_regression", "learning_rate": 0.05}"#)
                .unwrap();
        match &config {
            ClassifierConfig::LogisticRegression(p) => assert_eq!(p.learning_rate, 0.05),
            other => panic!("unexpected config {:?}", other),
        }
        assert_eq!(config.build().name(), "logistic_regression");
    }

    #[test]
    fn test_single_class_is_rejected() {
        let x = Matrix::new(vec!["a".into()], vec![vec![1.0], vec![2.0]]).unwrap();
        assert_eq!(
            check_training_input(&x, &[1, 1]).unwrap_err(),
            RuntimeError::SingleClass(1)
        );
        assert!(check_training_input(&x, &[0, 1]).is_ok());
        assert!(check_training_input(&x, &[0]).is_err());
    }
}
