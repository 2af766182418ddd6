//! Flat object-store storage backend
//!
//! The raw SDK lives behind the `ObjectStoreClient` boundary; this module
//! only adapts its flat key space to the `StorageBackend` interface. The
//! store has no native directory concept, so `list(prefix)` returns every
//! key sharing the prefix and hierarchy emulation is the session store's
//! concern.

use super::backend::{StorageBackend, StorageError};
use async_trait::async_trait;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum ObjectStoreError {
    NoSuchKey(String),
    Auth(String),
    Service(String),
}

impl std::fmt::Display for ObjectStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectStoreError::NoSuchKey(key) => write!(f, "Object does not exist: {}", key),
            ObjectStoreError::Auth(msg) => write!(f, "Access denied: {}", msg),
            ObjectStoreError::Service(msg) => write!(f, "Object store error: {}", msg),
        }
    }
}

impl std::error::Error for ObjectStoreError {}

/// Boundary trait for the object store's native operations.
///
/// Implemented outside the core by an SDK adapter that owns credentials,
/// bucket identity, and any retry policy.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    async fn put_object(&self, key: &str, body: &[u8]) -> Result<(), ObjectStoreError>;

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError>;

    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, ObjectStoreError>;
}

pub struct ObjectStorage {
    client: Box<dyn ObjectStoreClient>,
}

impl ObjectStorage {
    pub fn new(client: Box<dyn ObjectStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageBackend for ObjectStorage {
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), StorageError> {
        self.client.put_object(key, content).await.map_err(|e| match e {
            ObjectStoreError::Auth(msg) => StorageError::Backend(msg),
            other => StorageError::Write(format!("{}: {}", key, other)),
        })
    }

    async fn get(&self, key: &str) -> Result<String, StorageError> {
        let bytes = self.client.get_object(key).await.map_err(|e| match e {
            ObjectStoreError::NoSuchKey(_) => StorageError::NotFound(key.to_string()),
            other => StorageError::Backend(other.to_string()),
        })?;
        // Invalid UTF-8 is replaced rather than treated as an error
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.client
            .list_objects(prefix)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<(), StorageError> {
        let bytes = self.client.get_object(key).await.map_err(|e| match e {
            ObjectStoreError::NoSuchKey(_) => StorageError::NotFound(key.to_string()),
            other => StorageError::Backend(other.to_string()),
        })?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::Write(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(dest, bytes)
            .map_err(|e| StorageError::Write(format!("{}: {}", dest.display(), e)))
    }

    fn backend_type(&self) -> &'static str {
        "ObjectStore"
    }
}

/// In-memory object store used by tests in place of a real SDK adapter.
#[cfg(test)]
pub struct MemoryObjectStore {
    objects: std::sync::Mutex<std::collections::BTreeMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: std::sync::Mutex::new(std::collections::BTreeMap::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ObjectStoreClient for MemoryObjectStore {
    async fn put_object(&self, key: &str, body: &[u8]) -> Result<(), ObjectStoreError> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), body.to_vec());
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ObjectStoreError::NoSuchKey(key.to_string()))
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, ObjectStoreError> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
