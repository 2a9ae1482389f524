//! Request and model types of the serving engine

use crate::error::{Result, SdkError};
use recovery_core::{CanonicalField, Frame, RiskDecision};
use recovery_repository::ArtifactBundle;
use recovery_runtime::{
    add_derived_features, decide, ClassProbabilities, Classifier, RuntimeError, TrainingMetadata,
    TransformArtifact,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

/// Prediction request as accepted at the service boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PredictionRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub debt_amount: f64,

    #[validate(range(min = 0))]
    pub days_past_due: i64,

    #[validate(range(min = 300.0, max = 850.0))]
    pub credit_score: f64,

    #[validate(range(min = 0))]
    pub payment_attempts: i64,

    #[validate(range(min = 0))]
    pub communication_count: i64,
}

impl PredictionRequest {
    /// Validate the request and convert it into a partial feature map
    pub fn to_feature_map(&self) -> Result<HashMap<String, f64>> {
        self.validate()?;
        let floats = [
            ("debt_amount", self.debt_amount),
            ("credit_score", self.credit_score),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(SdkError::Validation(format!("{}: must be a finite number", name)));
            }
        }

        let mut features = HashMap::with_capacity(5);
        let mut put = |field: CanonicalField, value: f64| {
            features.insert(field.name().to_string(), value);
        };
        put(CanonicalField::DebtAmount, self.debt_amount);
        put(CanonicalField::DaysPastDue, self.days_past_due as f64);
        put(CanonicalField::CreditScore, self.credit_score);
        put(CanonicalField::PaymentAttempts, self.payment_attempts as f64);
        put(CanonicalField::CommunicationCount, self.communication_count as f64);
        Ok(features)
    }
}

/// Transform artifact, classifier and metadata of one training run.
///
/// Immutable once built; the engine replaces the whole value on reload.
#[derive(Debug)]
pub struct ServingModel {
    artifact: TransformArtifact,
    classifier: Arc<dyn Classifier>,
    metadata: TrainingMetadata,
}

impl ServingModel {
    pub fn new(
        artifact: TransformArtifact,
        classifier: Arc<dyn Classifier>,
        metadata: TrainingMetadata,
    ) -> Result<Self> {
        if metadata.num_features != artifact.num_features() {
            return Err(SdkError::ConfigError(format!(
                "metadata declares {} features but the transform artifact has {}",
                metadata.num_features,
                artifact.num_features()
            )));
        }
        Ok(Self {
            artifact,
            classifier,
            metadata,
        })
    }

    pub fn from_bundle(bundle: ArtifactBundle) -> Result<Self> {
        Self::new(bundle.transform, Arc::new(bundle.classifier), bundle.metadata)
    }

    pub fn artifact(&self) -> &TransformArtifact {
        &self.artifact
    }

    pub fn metadata(&self) -> &TrainingMetadata {
        &self.metadata
    }

    /// Score one partial feature map
    pub(crate) fn score(&self, features: &HashMap<String, f64>) -> Result<RiskDecision> {
        let mut frame = Frame::from_feature_map(features);
        add_derived_features(&mut frame)?;
        let matrix = self.artifact.transform(&frame)?;

        let outputs = self.classifier.predict_proba(&matrix)?;
        let output = outputs.first().ok_or(RuntimeError::DimensionMismatch {
            expected: 1,
            actual: 0,
        })?;
        let recovered = ClassProbabilities::from_recovered(output.recovered)?.recovered;
        Ok(decide(recovered))
    }
}
