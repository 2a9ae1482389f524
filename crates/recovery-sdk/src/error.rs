//! SDK error types

use recovery_repository::RepositoryError;
use recovery_runtime::RuntimeError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// No transform artifact and classifier are loaded
    #[error("Model unavailable: no transform artifact or classifier is loaded")]
    ModelUnavailable,

    /// Request rejected at the boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] RuntimeError),

    /// Artifact store error
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

impl SdkError {
    /// Short label used as the error metric name
    pub fn kind(&self) -> &'static str {
        match self {
            SdkError::ModelUnavailable => "model_unavailable",
            SdkError::Validation(_) => "validation",
            SdkError::ConfigError(_) => "config",
            SdkError::RuntimeError(RuntimeError::Core(_)) => "schema",
            SdkError::RuntimeError(RuntimeError::DimensionMismatch { .. }) => "dimension_mismatch",
            SdkError::RuntimeError(RuntimeError::NonFiniteInput { .. }) => "non_finite_input",
            SdkError::RuntimeError(RuntimeError::InvalidProbability(_)) => "invalid_probability",
            SdkError::RuntimeError(_) => "runtime",
            SdkError::RepositoryError(_) => "repository",
        }
    }
}

impl From<validator::ValidationErrors> for SdkError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SdkError::Validation(errors.to_string())
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable() {
        let error = SdkError::ModelUnavailable;
        assert!(error.to_string().contains("Model unavailable"));
        assert_eq!(error.kind(), "model_unavailable");
    }

    #[test]
    fn test_runtime_error_conversion() {
        let error: SdkError = RuntimeError::DimensionMismatch {
            expected: 3,
            actual: 2,
        }
        .into();
        assert!(error.to_string().contains("Runtime error"));
        assert_eq!(error.kind(), "dimension_mismatch");
    }

    #[test]
    fn test_repository_error_conversion() {
        let error: SdkError = RepositoryError::NoPublishedArtifact.into();
        assert!(error.to_string().contains("Repository error"));
        assert_eq!(error.kind(), "repository");
    }

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("test_size must be in (0, 1)".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("test_size"));
    }
}
