//! Recovery Repository - Artifact persistence
//!
//! Stores the fitted transform artifact, the classifier and the training
//! metadata as one bundle, behind the [`ArtifactStore`] trait:
//! - [`FileSystemArtifactStore`]: JSON files with atomic publish
//! - [`MemoryArtifactStore`]: process memory

pub mod config;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod models;
pub mod traits;

pub use config::{ArtifactStoreConfig, StoreBackend};
pub use error::{RepositoryError, RepositoryResult};
pub use file_system::FileSystemArtifactStore;
pub use memory::MemoryArtifactStore;
pub use models::{ArtifactBundle, ArtifactHandle};
pub use traits::ArtifactStore;
