//! In-memory artifact store, for tests and embedded use

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{ArtifactBundle, ArtifactHandle};
use crate::traits::ArtifactStore;

#[derive(Debug, Default)]
struct Inner {
    bundles: BTreeMap<ArtifactHandle, ArtifactBundle>,
    current: Option<ArtifactHandle>,
}

/// Artifact store kept in process memory
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    inner: RwLock<Inner>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn save(&self, bundle: &ArtifactBundle) -> RepositoryResult<ArtifactHandle> {
        let mut inner = self.inner.write().await;

        let base = ArtifactHandle::generate(&bundle.metadata.model_version, Utc::now());
        let mut handle = base.clone();
        let mut n = 1;
        while inner.bundles.contains_key(&handle) {
            handle = base.with_suffix(n);
            n += 1;
        }

        inner.bundles.insert(handle.clone(), bundle.clone());
        inner.current = Some(handle.clone());
        tracing::debug!(handle = %handle, "Stored artifact bundle in memory");
        Ok(handle)
    }

    async fn load(&self, handle: &ArtifactHandle) -> RepositoryResult<ArtifactBundle> {
        self.inner
            .read()
            .await
            .bundles
            .get(handle)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                handle: handle.to_string(),
            })
    }

    async fn latest(&self) -> RepositoryResult<Option<ArtifactHandle>> {
        Ok(self.inner.read().await.current.clone())
    }

    async fn list(&self) -> RepositoryResult<Vec<ArtifactHandle>> {
        let mut handles: Vec<ArtifactHandle> =
            self.inner.read().await.bundles.keys().cloned().collect();
        handles.sort_by(|a, b| a.publish_order().cmp(&b.publish_order()));
        Ok(handles)
    }
}
