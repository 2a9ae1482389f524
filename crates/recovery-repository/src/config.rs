//! Artifact store configuration
//!
//! Selects the backend a serving engine or training job persists bundles
//! to.
//!
//! ```rust
//! use recovery_repository::ArtifactStoreConfig;
//!
//! let config = ArtifactStoreConfig::file_system("artifacts");
//! let config = ArtifactStoreConfig::memory();
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{RepositoryError, RepositoryResult};
use crate::file_system::FileSystemArtifactStore;
use crate::memory::MemoryArtifactStore;
use crate::traits::ArtifactStore;

/// Store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    FileSystem,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactStoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Root directory (required for the file system backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
}

impl ArtifactStoreConfig {
    pub fn file_system(path: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::FileSystem,
            base_path: Some(path.into()),
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            base_path: None,
        }
    }

    /// Open the configured store
    pub fn build(&self) -> RepositoryResult<Arc<dyn ArtifactStore>> {
        match self.backend {
            StoreBackend::FileSystem => {
                let path = self.base_path.as_deref().ok_or_else(|| {
                    RepositoryError::Other(
                        "base_path is required for the file_system backend".to_string(),
                    )
                })?;
                Ok(Arc::new(FileSystemArtifactStore::new(path)?))
            }
            StoreBackend::Memory => Ok(Arc::new(MemoryArtifactStore::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let fs = ArtifactStoreConfig::file_system("artifacts");
        assert_eq!(fs.backend, StoreBackend::FileSystem);
        assert_eq!(fs.base_path.as_deref(), Some("artifacts"));

        assert_eq!(ArtifactStoreConfig::memory().backend, StoreBackend::Memory);
    }

    #[test]
    fn test_file_system_requires_path() {
        let config = ArtifactStoreConfig {
            backend: StoreBackend::FileSystem,
            base_path: None,
        };
        assert!(config.build().is_err());
        assert!(ArtifactStoreConfig::memory().build().is_ok());
    }

    #[test]
    fn test_deserialize() {
        let config: ArtifactStoreConfig =
            serde_json::from_str(r#"{"backend": "file_system", "base_path": "/var/models"}"#)
                .unwrap();
        assert_eq!(config, ArtifactStoreConfig::file_system("/var/models"));
    }
}
