//! Builder pattern for RecoveryEngine

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::recovery_engine::{RecoveryEngine, ServingModel};
use recovery_repository::{ArtifactStore, RepositoryError};
use std::sync::Arc;

/// Builder for RecoveryEngine
///
/// # Example
///
/// ```rust,ignore
/// use recovery_sdk::{EngineConfig, RecoveryEngineBuilder};
///
/// // Load the published bundle from a directory
/// let engine = RecoveryEngineBuilder::new()
///     .with_config(EngineConfig::new().with_artifact_dir("artifacts"))
///     .require_model(true)
///     .build()
///     .await?;
///
/// // Install a model directly (tests, embedded use)
/// let engine = RecoveryEngineBuilder::new()
///     .with_model(model)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct RecoveryEngineBuilder {
    config: EngineConfig,
    store: Option<Arc<dyn ArtifactStore>>,
    model: Option<ServingModel>,
    require_model: bool,
}

impl RecoveryEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already opened store instead of the configured one
    pub fn with_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Install this model instead of loading from the store
    pub fn with_model(mut self, model: ServingModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Fail the build when no bundle has been published
    pub fn require_model(mut self, require: bool) -> Self {
        self.require_model = require;
        self
    }

    /// Build the engine
    pub async fn build(self) -> Result<RecoveryEngine> {
        self.config.validate()?;

        let store = match self.store {
            Some(store) => store,
            None => self.config.store.build()?,
        };
        let engine = RecoveryEngine::new(self.config, Some(store.clone()));

        if let Some(model) = self.model {
            engine.install(model);
            return Ok(engine);
        }

        match engine.reload_from(store.as_ref()).await {
            Ok(_) => {}
            Err(SdkError::RepositoryError(RepositoryError::NoPublishedArtifact))
                if !self.require_model =>
            {
                tracing::warn!("No published artifact bundle, engine starts without a model");
            }
            Err(SdkError::RepositoryError(RepositoryError::NoPublishedArtifact)) => {
                return Err(SdkError::ModelUnavailable);
            }
            Err(e) => return Err(e),
        }
        Ok(engine)
    }
}
