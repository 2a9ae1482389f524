//! Training metadata persisted next to the model

use super::evaluation::EvaluationMetrics;
use crate::validation::ClassBalance;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Description of a training run, returned as-is by the serving engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub model_version: String,
    pub model_name: String,
    pub training_date: DateTime<Utc>,
    /// Held-out metrics; `None` when the split left no test rows
    pub metrics: Option<EvaluationMetrics>,
    pub feature_names: Vec<String>,
    pub num_features: usize,
    pub training_samples: usize,
    pub test_samples: usize,
    pub class_balance: ClassBalance,
}
