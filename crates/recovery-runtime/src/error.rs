//! Runtime error types

use recovery_core::CoreError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Core type error (including unknown source descriptors)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Fit called on a frame without the label column
    #[error("Target column '{0}' not found in frame")]
    MissingTarget(String),

    /// No labelled rows left after filtering
    #[error("Training set is empty after removing unlabeled rows")]
    EmptyTrainingSet,

    /// Labels contain a single outcome only
    #[error("Training labels contain a single class: {0}")]
    SingleClass(u8),

    /// Matrix width differs from what the artifact or classifier expects
    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// NaN or infinity reached the numeric matrix
    #[error("Non-finite value in column '{column}'")]
    NonFiniteInput { column: String },

    /// Classifier output outside [0, 1]
    #[error("Invalid probability from classifier: {0}")]
    InvalidProbability(f64),

    /// Classifier used before it was fitted
    #[error("Classifier '{0}' has not been fitted")]
    NotFitted(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
