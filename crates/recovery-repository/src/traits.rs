//! Artifact store interface
//!
//! A store publishes [`ArtifactBundle`]s and hands back an opaque
//! [`ArtifactHandle`] for each. Publishing is all-or-nothing: once `save`
//! returns, `latest` names the new bundle; if `save` fails, `latest` still
//! names the previous one.
//!
//! # Examples
//!
//! ```no_run
//! use recovery_repository::{ArtifactStore, FileSystemArtifactStore};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let store = FileSystemArtifactStore::new("artifacts")?;
//!
//! // Load whatever was published last
//! let bundle = store.load_latest().await?;
//! println!("model {}", bundle.metadata.model_version);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{ArtifactBundle, ArtifactHandle};

/// Persistence for fitted artifact bundles
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist and publish a bundle
    async fn save(&self, bundle: &ArtifactBundle) -> RepositoryResult<ArtifactHandle>;

    /// Load a bundle by handle
    async fn load(&self, handle: &ArtifactHandle) -> RepositoryResult<ArtifactBundle>;

    /// Handle of the most recently published bundle
    async fn latest(&self) -> RepositoryResult<Option<ArtifactHandle>>;

    /// Handles of every stored bundle, oldest first by publish time
    /// (see [`ArtifactHandle::publish_order`])
    async fn list(&self) -> RepositoryResult<Vec<ArtifactHandle>>;

    /// Load the most recently published bundle
    async fn load_latest(&self) -> RepositoryResult<ArtifactBundle> {
        let handle = self
            .latest()
            .await?
            .ok_or(RepositoryError::NoPublishedArtifact)?;
        self.load(&handle).await
    }
}
