//! Stored artifact types

use chrono::{DateTime, Utc};
use recovery_runtime::{ClassifierModel, TrainingMetadata, TransformArtifact};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RepositoryError, RepositoryResult};

/// Everything a serving engine needs, published together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub transform: TransformArtifact,
    pub classifier: ClassifierModel,
    pub metadata: TrainingMetadata,
}

/// Opaque name of a published bundle
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactHandle(String);

impl ArtifactHandle {
    /// Parse a handle; it must be usable as a single path component
    pub fn parse(value: impl Into<String>) -> RepositoryResult<Self> {
        let value = value.into();
        let valid = !value.is_empty()
            && value != "."
            && value != ".."
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(RepositoryError::InvalidHandle(value));
        }
        Ok(Self(value))
    }

    /// Handle for a bundle published at `at`
    pub fn generate(model_version: &str, at: DateTime<Utc>) -> Self {
        let version: String = model_version
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Self(format!("v{}-{}", version, at.format("%Y%m%dT%H%M%S%3f")))
    }

    /// Same handle with a numeric suffix, used on collision
    pub(crate) fn with_suffix(&self, n: u32) -> Self {
        Self(format!("{}-{}", self.0, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sort key ordering generated handles by publish time, then collision suffix.
    ///
    /// The version prefix is skipped so `v1.9.0` published after `v2.0.0`
    /// sorts after it. Handles not produced by [`ArtifactHandle::generate`]
    /// fall back to plain string order among themselves.
    pub fn publish_order(&self) -> (&str, u32, &str) {
        let rest = self.0.split_once('-').map_or(self.0.as_str(), |(_, rest)| rest);
        let (stamp, suffix) = match rest.split_once('-') {
            Some((stamp, n)) => (stamp, n.parse().unwrap_or(0)),
            None => (rest, 0),
        };
        (stamp, suffix, self.0.as_str())
    }
}

impl fmt::Display for ArtifactHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
