//! File system based artifact store
//!
//! Layout under the root directory:
//!
//! ```text
//! root/
//!   CURRENT                  handle of the published bundle
//!   bundles/<handle>/
//!     transform.json
//!     classifier.json
//!     metadata.json
//!   .staging-<handle>/       bundle being written
//! ```
//!
//! A bundle is written into a staging directory, renamed into `bundles/`,
//! and only then published by replacing `CURRENT` through a rename. A
//! failure at any step leaves the previously published bundle in place.

use async_trait::async_trait;
use chrono::Utc;
use path_absolutize::Absolutize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{ArtifactBundle, ArtifactHandle};
use crate::traits::ArtifactStore;

const CURRENT_FILE: &str = "CURRENT";
const BUNDLES_DIR: &str = "bundles";
const STAGING_PREFIX: &str = ".staging-";
const TRANSFORM_FILE: &str = "transform.json";
const CLASSIFIER_FILE: &str = "classifier.json";
const METADATA_FILE: &str = "metadata.json";

/// Artifact store rooted at a directory
#[derive(Debug)]
pub struct FileSystemArtifactStore {
    root_path: PathBuf,
    /// Serializes publishers within this process
    publish_lock: Mutex<()>,
}

impl FileSystemArtifactStore {
    /// Open a store, creating the root directory if needed
    pub fn new<P: AsRef<Path>>(root_path: P) -> RepositoryResult<Self> {
        let path = root_path.as_ref();
        std::fs::create_dir_all(path.join(BUNDLES_DIR))?;

        let abs_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();
        if !abs_path.is_dir() {
            return Err(RepositoryError::InvalidPath { path: abs_path });
        }

        Ok(Self {
            root_path: abs_path,
            publish_lock: Mutex::new(()),
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn bundle_dir(&self, handle: &ArtifactHandle) -> PathBuf {
        self.root_path.join(BUNDLES_DIR).join(handle.as_str())
    }

    fn staging_dir(&self, handle: &ArtifactHandle) -> PathBuf {
        self.root_path
            .join(format!("{}{}", STAGING_PREFIX, handle.as_str()))
    }

    /// Pick a handle no existing bundle uses
    async fn fresh_handle(&self, model_version: &str) -> RepositoryResult<ArtifactHandle> {
        let base = ArtifactHandle::generate(model_version, Utc::now());
        let mut handle = base.clone();
        let mut n = 1;
        while fs::try_exists(self.bundle_dir(&handle)).await?
            || fs::try_exists(self.staging_dir(&handle)).await?
        {
            handle = base.with_suffix(n);
            n += 1;
        }
        Ok(handle)
    }

    async fn write_bundle(&self, dir: &Path, bundle: &ArtifactBundle) -> RepositoryResult<()> {
        fs::create_dir_all(dir).await?;
        write_json(&dir.join(TRANSFORM_FILE), &bundle.transform).await?;
        write_json(&dir.join(CLASSIFIER_FILE), &bundle.classifier).await?;
        write_json(&dir.join(METADATA_FILE), &bundle.metadata).await?;
        Ok(())
    }

    /// Point `CURRENT` at `handle` by renaming a fully written temp file over it
    async fn publish(&self, handle: &ArtifactHandle) -> RepositoryResult<()> {
        let tmp = self
            .root_path
            .join(format!("{}.{}.tmp", CURRENT_FILE, handle.as_str()));
        fs::write(&tmp, handle.as_str()).await?;
        if let Err(e) = fs::rename(&tmp, self.root_path.join(CURRENT_FILE)).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for FileSystemArtifactStore {
    async fn save(&self, bundle: &ArtifactBundle) -> RepositoryResult<ArtifactHandle> {
        let _guard = self.publish_lock.lock().await;

        let handle = self.fresh_handle(&bundle.metadata.model_version).await?;
        let staging = self.staging_dir(&handle);

        if let Err(e) = self.write_bundle(&staging, bundle).await {
            tracing::error!(handle = %handle, error = %e, "Failed to write artifact bundle");
            let _ = fs::remove_dir_all(&staging).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&staging, self.bundle_dir(&handle)).await {
            let _ = fs::remove_dir_all(&staging).await;
            return Err(e.into());
        }

        self.publish(&handle).await?;
        tracing::info!(
            handle = %handle,
            model_version = %bundle.metadata.model_version,
            path = %self.root_path.display(),
            "Published artifact bundle"
        );
        Ok(handle)
    }

    async fn load(&self, handle: &ArtifactHandle) -> RepositoryResult<ArtifactBundle> {
        let dir = self.bundle_dir(handle);
        if !fs::try_exists(&dir).await? {
            return Err(RepositoryError::NotFound {
                handle: handle.to_string(),
            });
        }

        let bundle = ArtifactBundle {
            transform: read_json(&dir.join(TRANSFORM_FILE)).await?,
            classifier: read_json(&dir.join(CLASSIFIER_FILE)).await?,
            metadata: read_json(&dir.join(METADATA_FILE)).await?,
        };
        tracing::debug!(handle = %handle, "Loaded artifact bundle");
        Ok(bundle)
    }

    async fn latest(&self) -> RepositoryResult<Option<ArtifactHandle>> {
        let current = self.root_path.join(CURRENT_FILE);
        match fs::read_to_string(&current).await {
            Ok(content) => Ok(Some(ArtifactHandle::parse(content.trim())?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> RepositoryResult<Vec<ArtifactHandle>> {
        let mut handles = Vec::new();
        let mut entries = fs::read_dir(self.root_path.join(BUNDLES_DIR)).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if let Ok(handle) = ArtifactHandle::parse(name) {
                    handles.push(handle);
                }
            }
        }
        handles.sort_by(|a, b| a.publish_order().cmp(&b.publish_order()));
        Ok(handles)
    }
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> RepositoryResult<()> {
    let content = serde_json::to_vec_pretty(value)?;
    fs::write(path, content).await?;
    Ok(())
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> RepositoryResult<T> {
    let content = fs::read(path).await?;
    Ok(serde_json::from_slice(&content)?)
}
