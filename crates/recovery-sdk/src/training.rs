//! Offline training
//!
//! Runs the whole fitting path over sourced records and publishes the
//! resulting bundle:
//!
//! 1. map every record into the canonical schema and add derived features
//! 2. validate the training frame
//! 3. fit the transform artifact on all labelled rows
//! 4. split stratified, fit the classifier on the training side
//! 5. evaluate on the held-out side
//! 6. save the bundle; the store publishes it only after a full write

use crate::config::EngineConfig;
use crate::error::Result;
use chrono::Utc;
use recovery_repository::{ArtifactBundle, ArtifactHandle, ArtifactStore};
use recovery_runtime::{
    evaluate, stratified_split, validate_training_frame, ClassBalance, Classifier,
    DataQualityReport, FeatureEngineer, SourcedRecord, TrainingMetadata, TransformArtifact,
};

/// Result of a published training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub handle: ArtifactHandle,
    pub bundle: ArtifactBundle,
    pub report: DataQualityReport,
}

/// Fits and publishes artifact bundles
#[derive(Debug)]
pub struct Trainer {
    config: EngineConfig,
    engineer: FeatureEngineer,
}

impl Trainer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            engineer: FeatureEngineer::new(),
        }
    }

    /// Use a feature engineer with additional source mappings
    pub fn with_engineer(mut self, engineer: FeatureEngineer) -> Self {
        self.engineer = engineer;
        self
    }

    /// Fit a bundle without publishing it
    pub fn fit(&self, records: &[SourcedRecord]) -> Result<(ArtifactBundle, DataQualityReport)> {
        self.config.validate()?;
        let options = &self.config.training;

        let frame = self.engineer.build_training_frame(records)?;
        let report = validate_training_frame(&frame, options.min_class_proportion)?;

        let fit = TransformArtifact::fit(&frame)?;
        let split = stratified_split(&fit.labels, options.test_size, options.random_state)?;

        let pick = |indices: &[usize]| -> Vec<u8> { indices.iter().map(|&i| fit.labels[i]).collect() };
        let train_x = fit.matrix.select_rows(&split.train);
        let train_y = pick(&split.train);
        let test_x = fit.matrix.select_rows(&split.test);
        let test_y = pick(&split.test);

        let mut classifier = self.config.classifier.build();
        classifier.fit(&train_x, &train_y)?;

        let metrics = if test_y.is_empty() {
            None
        } else {
            Some(evaluate(&classifier, &test_x, &test_y)?)
        };

        match &metrics {
            Some(m) => tracing::info!(
                model = classifier.name(),
                train = train_y.len(),
                test = test_y.len(),
                accuracy = m.accuracy,
                roc_auc = ?m.roc_auc,
                f1 = m.f1_score,
                "Trained classifier"
            ),
            None => tracing::info!(
                model = classifier.name(),
                train = train_y.len(),
                "Trained classifier without a held-out set"
            ),
        }

        let metadata = TrainingMetadata {
            model_version: self.config.model_version.clone(),
            model_name: classifier.name().to_string(),
            training_date: Utc::now(),
            metrics,
            feature_names: fit.artifact.ordered_feature_names().to_vec(),
            num_features: fit.artifact.num_features(),
            training_samples: train_y.len(),
            test_samples: test_y.len(),
            class_balance: ClassBalance::from_labels(&fit.labels, options.min_class_proportion),
        };

        let bundle = ArtifactBundle {
            transform: fit.artifact,
            classifier,
            metadata,
        };
        Ok((bundle, report))
    }

    /// Fit a bundle and publish it to `store`.
    ///
    /// Nothing is written when fitting fails.
    pub async fn train(
        &self,
        records: &[SourcedRecord],
        store: &dyn ArtifactStore,
    ) -> Result<TrainingOutcome> {
        let (bundle, report) = self.fit(records)?;
        let handle = store.save(&bundle).await?;
        tracing::info!(
            handle = %handle,
            model_version = %bundle.metadata.model_version,
            "Training run published"
        );
        Ok(TrainingOutcome {
            handle,
            bundle,
            report,
        })
    }
}
