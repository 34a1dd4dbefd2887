//! Binary storage backends for media attributes.
//!
//! Akeneo stores media attributes (images, assets, documents) as a path
//! such as `a/b/c/d/abcdef_bag.jpg`. [`Entity::blob`](crate::rest::Entity::blob)
//! resolves such a path through the [`Storage`] configured on the client.
//!
//! - [`FileStorage`]: reads from a directory, typically a mounted copy of
//!   the PIM's file catalog
//! - [`MemoryStorage`]: serves bytes from memory

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while reading from storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The client has no storage backend.
    #[error("No storage backend is configured")]
    NotConfigured,

    /// The requested path is empty.
    #[error("Cannot read an empty storage path")]
    EmptyPath,

    /// The path escapes the storage root.
    #[error("Storage path '{path}' is not relative to the storage root")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// Nothing is stored under the path.
    #[error("Nothing stored at '{path}'")]
    NotFound {
        /// The missing path.
        path: String,
    },

    /// The backend failed to read the path.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A backend that resolves stored paths to bytes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the full content stored at `path`.
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;
}

/// Rejects empty paths and paths that leave the storage root.
fn relative_path(path: &str) -> Result<PathBuf, StorageError> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(StorageError::EmptyPath);
    }

    let relative = PathBuf::from(trimmed);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(StorageError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(relative)
}

/// Reads stored paths relative to a root directory.
///
/// # Example
///
/// ```rust,ignore
/// use akeneo_api::storage::FileStorage;
///
/// let client = client.with_storage(FileStorage::new("/var/pim/file_storage/catalog"));
/// let bytes = client.product("1111111171")?.blob("picture").await?;
/// ```
#[derive(Clone, Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.root.join(relative_path(path)?);
        tracing::debug!("Reading {} from file storage", full_path.display());

        tokio::fs::read(&full_path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound {
                    path: path.to_string(),
                }
            } else {
                StorageError::Io {
                    path: path.to_string(),
                    source,
                }
            }
        })
    }
}

/// Serves bytes registered in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `bytes` under `path`.
    #[must_use]
    pub fn with_blob(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.blobs.insert(path.into(), bytes.into());
        self
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let key = relative_path(path)?;
        self.blobs
            .get(key.to_string_lossy().as_ref())
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                path: path.to_string(),
            })
    }
}
