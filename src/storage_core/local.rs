//! Local filesystem storage backend

use super::backend::{StorageBackend, StorageError};
use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Maps keys directly to filesystem paths under a configured root,
/// creating parent directories on write.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in key.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }

    fn collect_keys(&self, dir: &Path, keys: &mut Vec<String>) -> std::io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                self.collect_keys(&path, keys)?;
            } else if let Ok(relative) = path.strip_prefix(&self.root) {
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                keys.push(key);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::Write(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(&path, content)
            .map_err(|e| StorageError::Write(format!("{}: {}", path.display(), e)))
    }

    async fn get(&self, key: &str) -> Result<String, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::Backend(format!("{}: {}", path.display(), e))),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        self.collect_keys(&self.root, &mut keys)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        keys.retain(|key| key.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }

    async fn download(&self, key: &str, dest: &Path) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::Write(format!("{}: {}", parent.display(), e)))?;
        }
        fs::copy(&path, dest)
            .map(|_| ())
            .map_err(|e| StorageError::Write(format!("{}: {}", dest.display(), e)))
    }

    fn backend_type(&self) -> &'static str {
        "Local"
    }
}
