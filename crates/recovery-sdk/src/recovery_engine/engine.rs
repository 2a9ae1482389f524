//! Core RecoveryEngine implementation

use super::types::{PredictionRequest, ServingModel};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use parking_lot::RwLock;
use recovery_core::RiskDecision;
use recovery_repository::{ArtifactHandle, ArtifactStore};
use recovery_runtime::{MetricsCollector, TrainingMetadata};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Serving engine.
///
/// Holds at most one [`ServingModel`]. Scoring takes a snapshot of the
/// current model and never writes shared state, so concurrent calls do not
/// wait on each other. `install` and `reload` swap the whole model.
pub struct RecoveryEngine {
    /// Active model
    model: RwLock<Option<Arc<ServingModel>>>,

    /// Store used by [`RecoveryEngine::reload`]
    store: Option<Arc<dyn ArtifactStore>>,

    /// Metrics collector
    metrics: Arc<MetricsCollector>,

    /// Configuration
    config: EngineConfig,
}

impl RecoveryEngine {
    /// Create an engine with no model loaded
    pub fn new(config: EngineConfig, store: Option<Arc<dyn ArtifactStore>>) -> Self {
        Self {
            model: RwLock::new(None),
            store,
            metrics: Arc::new(MetricsCollector::new()),
            config,
        }
    }

    fn snapshot(&self) -> Option<Arc<ServingModel>> {
        self.model.read().clone()
    }

    fn current(&self) -> Result<Arc<ServingModel>> {
        self.snapshot().ok_or_else(|| {
            if self.config.enable_metrics {
                self.metrics.record_error(SdkError::ModelUnavailable.kind());
            }
            SdkError::ModelUnavailable
        })
    }

    /// Whether a model is loaded
    pub fn is_ready(&self) -> bool {
        self.model.read().is_some()
    }

    /// Score one partial feature map.
    ///
    /// Canonical fields missing from `features` are zero-filled before
    /// normalization; names outside the trained schema are ignored.
    pub fn predict(&self, features: &HashMap<String, f64>) -> Result<RiskDecision> {
        let model = self.current()?;
        self.score(&model, features)
    }

    /// Validate a boundary request, then score it
    pub fn predict_request(&self, request: &PredictionRequest) -> Result<RiskDecision> {
        let features = match request.to_feature_map() {
            Ok(features) => features,
            Err(e) => {
                self.record_failure(&e);
                return Err(e);
            }
        };
        self.predict(&features)
    }

    /// Score each feature map independently.
    ///
    /// The outer error is only `ModelUnavailable`. Every record gets its own
    /// result, in input order, all scored against the same model snapshot.
    pub fn predict_batch(
        &self,
        batch: &[HashMap<String, f64>],
    ) -> Result<Vec<Result<RiskDecision>>> {
        let model = self.current()?;
        let results: Vec<_> = batch
            .iter()
            .map(|features| self.score(&model, features))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::debug!(size = batch.len(), failed, "Scored batch");
        Ok(results)
    }

    fn score(&self, model: &ServingModel, features: &HashMap<String, f64>) -> Result<RiskDecision> {
        let start = Instant::now();
        match model.score(features) {
            Ok(decision) => {
                if self.config.enable_metrics {
                    self.metrics.record_prediction(
                        decision.risk_category,
                        decision.recovery_probability,
                        start.elapsed(),
                    );
                }
                tracing::debug!(
                    recovery_probability = decision.recovery_probability,
                    risk_category = %decision.risk_category,
                    "Scored case"
                );
                Ok(decision)
            }
            Err(e) => {
                self.record_failure(&e);
                tracing::debug!(error = %e, "Scoring failed");
                Err(e)
            }
        }
    }

    fn record_failure(&self, error: &SdkError) {
        if self.config.enable_metrics {
            self.metrics.record_error(error.kind());
        }
    }

    /// Metadata of the loaded training run
    pub fn model_info(&self) -> Result<TrainingMetadata> {
        Ok(self.current()?.metadata().clone())
    }

    /// Replace the active model
    pub fn install(&self, model: ServingModel) {
        let version = model.metadata().model_version.clone();
        let features = model.artifact().num_features();
        *self.model.write() = Some(Arc::new(model));
        tracing::info!(model_version = %version, features, "Installed serving model");
    }

    /// Load the published bundle from the configured store.
    ///
    /// The active model is only replaced once the new one is fully loaded.
    pub async fn reload(&self) -> Result<ArtifactHandle> {
        let store = self.store.as_ref().ok_or_else(|| {
            SdkError::ConfigError("no artifact store configured for reload".to_string())
        })?;
        self.reload_from(store.as_ref()).await
    }

    /// Load the published bundle from `store`
    pub async fn reload_from(&self, store: &dyn ArtifactStore) -> Result<ArtifactHandle> {
        let result = async {
            let handle = store
                .latest()
                .await?
                .ok_or(recovery_repository::RepositoryError::NoPublishedArtifact)?;
            let bundle = store.load(&handle).await?;
            let model = ServingModel::from_bundle(bundle)?;
            Ok::<_, SdkError>((handle, model))
        }
        .await;

        match result {
            Ok((handle, model)) => {
                self.install(model);
                tracing::info!(handle = %handle, "Reloaded serving model");
                Ok(handle)
            }
            Err(e) => {
                tracing::error!(error = %e, "Reload failed, keeping the current model");
                Err(e)
            }
        }
    }

    /// Get metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Get configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl std::fmt::Debug for RecoveryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryEngine")
            .field("ready", &self.is_ready())
            .field("has_store", &self.store.is_some())
            .field("config", &self.config)
            .finish()
    }
}
