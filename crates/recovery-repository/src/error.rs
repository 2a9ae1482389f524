//! Error types for the artifact store

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for store operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur while saving or loading artifact bundles
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No bundle stored under the handle
    #[error("Artifact bundle not found: {handle}")]
    NotFound { handle: String },

    /// Nothing has been published yet
    #[error("No artifact bundle has been published")]
    NoPublishedArtifact,

    /// Handle that cannot name a bundle (empty, or containing path components)
    #[error("Invalid artifact handle: '{0}'")]
    InvalidHandle(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid path provided
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RepositoryError::NotFound {
            handle: "v1.0.0-20260101T000000000".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Artifact bundle not found: v1.0.0-20260101T000000000"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RepositoryError = io.into();
        assert!(matches!(err, RepositoryError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_serialization_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: RepositoryError = json_err.into();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
