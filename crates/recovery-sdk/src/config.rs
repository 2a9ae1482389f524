//! Configuration types for RecoveryEngine and training

use crate::error::{Result, SdkError};
use recovery_repository::ArtifactStoreConfig;
use recovery_runtime::ClassifierConfig;
use serde::{Deserialize, Serialize};

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where bundles are published and loaded from
    pub store: ArtifactStoreConfig,

    /// Classifier kind and hyperparameters used by training
    pub classifier: ClassifierConfig,

    /// Training options
    pub training: TrainingOptions,

    /// Version string stamped into training metadata
    pub model_version: String,

    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            store: ArtifactStoreConfig::file_system("artifacts"),
            classifier: ClassifierConfig::default(),
            training: TrainingOptions::default(),
            model_version: "1.0.0".to_string(),
            enable_metrics: true,
        }
    }

    /// Set the artifact store
    pub fn with_store(mut self, store: ArtifactStoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Use a file system store rooted at `path`
    pub fn with_artifact_dir(mut self, path: impl Into<String>) -> Self {
        self.store = ArtifactStoreConfig::file_system(path);
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.training.test_size = test_size;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.training.random_state = seed;
        self
    }

    pub fn with_min_class_proportion(mut self, proportion: f64) -> Self {
        self.training.min_class_proportion = proportion;
        self
    }

    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = version.into();
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Reject settings training or serving cannot work with
    pub fn validate(&self) -> Result<()> {
        let t = &self.training;
        if !(t.test_size > 0.0 && t.test_size < 1.0) {
            return Err(SdkError::ConfigError(format!(
                "test_size must be in (0, 1), got {}",
                t.test_size
            )));
        }
        if !(0.0..=0.5).contains(&t.min_class_proportion) {
            return Err(SdkError::ConfigError(format!(
                "min_class_proportion must be in [0, 0.5], got {}",
                t.min_class_proportion
            )));
        }
        if self.model_version.trim().is_empty() {
            return Err(SdkError::ConfigError(
                "model_version must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Training options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingOptions {
    /// Fraction of labelled rows held out for evaluation
    pub test_size: f64,

    /// Seed of the stratified split
    pub random_state: u64,

    /// Smallest class share considered balanced
    pub min_class_proportion: f64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            random_state: 42,
            min_class_proportion: 0.1,
        }
    }
}
