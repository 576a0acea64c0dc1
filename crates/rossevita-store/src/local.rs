use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rossevita_core::StorageObject;
use tracing::warn;

use crate::{ObjectStore, StoreConfig, StoreError};

pub struct LocalStore {
    base_dir: PathBuf,
}

impl LocalStore {
    pub fn new(config: &StoreConfig) -> Self {
        let base_dir = config
            .local_data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Keys resolve strictly inside `base_dir`: absolute keys and keys with
    /// `..` (or other non-normal) components are rejected before any
    /// filesystem access.
    fn resolve(&self, key: &str) -> Result<PathBuf, StoreError> {
        let path = Path::new(key);
        let escapes = path.is_absolute()
            || path
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            warn!("rejected object key that escapes the store: {key}");
            return Err(StoreError::Internal(format!("invalid object key: {key}")));
        }
        Ok(self.base_dir.join(path))
    }
}

/// Reproduce the same default data directory logic as
/// `rossevita_db::default_data_dir()` without taking a dependency on the
/// db crate.
fn default_data_dir() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("rossevita").join("objects")
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(&self, key: &str, data: Bytes) -> Result<(), StoreError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Internal(format!("mkdir: {e}")))?;
        }
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| StoreError::Internal(format!("write {}: {e}", path.display())))
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let path = self.resolve(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::Internal(format!(
                "read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StorageObject>, StoreError> {
        if !self.base_dir.exists() {
            return Ok(vec![]);
        }
        let mut objects = Vec::new();
        let mut stack = vec![self.base_dir.clone()];
        while let Some(current) = stack.pop() {
            let mut entries = match tokio::fs::read_dir(&current).await {
                Ok(e) => e,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(StoreError::Internal(format!(
                        "list {}: {e}",
                        current.display()
                    )))
                }
            };
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| StoreError::Internal(format!("read_dir entry: {e}")))?
            {
                let path = entry.path();
                let ft = entry
                    .file_type()
                    .await
                    .map_err(|e| StoreError::Internal(format!("file_type: {e}")))?;
                if ft.is_dir() {
                    stack.push(path);
                } else if let Ok(rel) = path.strip_prefix(&self.base_dir) {
                    // Same string-prefix match on the object name as S3
                    let name = rel.to_string_lossy().to_string();
                    if !name.starts_with(prefix) {
                        continue;
                    }
                    let meta = entry
                        .metadata()
                        .await
                        .map_err(|e| StoreError::Internal(format!("metadata: {e}")))?;
                    let created_at = meta
                        .modified()
                        .ok()
                        .map(DateTime::<Utc>::from);
                    objects.push(StorageObject {
                        name,
                        size: Some(meta.len() as i64),
                        created_at,
                    });
                }
            }
        }
        objects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(objects)
    }
}
