//! Recovery SDK
//!
//! High-level API for scoring debt recovery cases and training the models
//! behind them.

pub mod builder;
pub mod config;
pub mod error;
pub mod recovery_engine;
pub mod training;

// Re-export main types
pub use builder::RecoveryEngineBuilder;
pub use config::{EngineConfig, TrainingOptions};
pub use error::{Result, SdkError};
pub use recovery_engine::{PredictionRequest, RecoveryEngine, ServingModel};
pub use training::{Trainer, TrainingOutcome};

// Re-export commonly used types from dependencies
pub use recovery_core::{RawRecord, RecommendedStrategy, RiskCategory, RiskDecision, Value};
pub use recovery_repository::{ArtifactHandle, ArtifactStore, ArtifactStoreConfig};
pub use recovery_runtime::{
    ClassifierConfig, MetricsCollector, SourceDescriptor, SourcedRecord, TrainingMetadata,
};
