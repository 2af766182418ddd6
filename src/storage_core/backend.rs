//! Storage backend trait shared by the local filesystem and object store

use async_trait::async_trait;
use std::path::Path;

#[derive(Debug)]
pub enum StorageError {
    NotFound(String),
    Write(String),
    Backend(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotFound(key) => write!(f, "Key not found: {}", key),
            StorageError::Write(msg) => write!(f, "Write failed: {}", msg),
            StorageError::Backend(msg) => write!(f, "Storage backend error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Key-based storage primitives, implemented once per backend.
///
/// Keys are `/`-separated and carry no backend semantics; the session store
/// owns key construction. Operations are blocking, retryless calls from the
/// core's perspective; retry policy belongs to the backend adapter.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store content under a key, overwriting any existing value.
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Read the content stored under a key.
    async fn get(&self, key: &str) -> Result<String, StorageError>;

    /// List every stored key sharing the given prefix.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Copy a stored object to a local file, for callers that need a real
    /// file handle (display, charting). Not an aggregation dependency.
    async fn download(&self, key: &str, dest: &Path) -> Result<(), StorageError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
