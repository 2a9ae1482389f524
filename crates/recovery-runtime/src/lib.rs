//! Recovery Runtime - Feature and scoring runtime
//!
//! This crate turns raw source records into classifier inputs and
//! classifier outputs into decisions:
//! - Source-aware feature engineering and the derived-features pass
//! - Schema alignment, categorical encoding and numeric normalization
//! - The persisted transform artifact binding training to serving
//! - Classifier interface, variants, evaluation and train/test split
//! - Risk categorization
//! - Training data validation and scoring metrics

pub mod categorizer;
pub mod error;
pub mod feature;
pub mod model;
pub mod observability;
pub mod transform;
pub mod validation;

pub use categorizer::{categorize, decide, LOW_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
pub use error::{Result, RuntimeError};
pub use feature::{
    add_derived_features, FeatureEngineer, SourceDescriptor, SourceMapping, SourcedRecord,
};
pub use model::{
    evaluate, stratified_split, ClassProbabilities, Classifier, ClassifierConfig,
    ClassifierModel, EvaluationMetrics, TrainingMetadata,
};
pub use observability::{MetricsCollector, MetricsSnapshot};
pub use transform::{align, CodeTable, Matrix, TransformArtifact, TransformFit, UNSEEN_CODE};
pub use validation::{validate_training_frame, ClassBalance, DataQualityReport};
