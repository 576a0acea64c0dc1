use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use rossevita_core::attachment::public_object_url;
use rossevita_core::AttachmentRecord;
use rossevita_db::Db;
use rossevita_local::UploadCache;
use rossevita_store::ObjectStore;

use crate::ServiceError;

/// The three listings reconciliation merges, tagged so precedence is a
/// named constant rather than implicit call-site ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Durable metadata table, shared across users. Base layer.
    Table,
    /// Remote object listing. Overlays storage-derived truth.
    Storage,
    /// Device-local upload cache. Final overlay.
    Cache,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Table => "table",
            SourceKind::Storage => "storage",
            SourceKind::Cache => "cache",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merge order, lowest precedence first. A later source's present fields
/// overwrite the accumulated record's; absent fields never erase.
pub const SOURCE_PRECEDENCE: [SourceKind; 3] =
    [SourceKind::Table, SourceKind::Storage, SourceKind::Cache];

/// One listing of attachment records, possibly partial and possibly stale.
/// A failed fetch contributes nothing to the merge; it never aborts it.
#[async_trait]
pub trait ReconcileSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn fetch(&self) -> Result<Vec<AttachmentRecord>, ServiceError>;
}

/// Reads the `attachments` metadata table (most recent rows first).
/// A missing table or denied query surfaces as an error here and is
/// downgraded to an empty contribution by the reconciler.
pub struct TableSource {
    db: Db,
}

impl TableSource {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReconcileSource for TableSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Table
    }

    async fn fetch(&self) -> Result<Vec<AttachmentRecord>, ServiceError> {
        let rows = self.db.list_recent_attachments()?;
        Ok(rows
            .into_iter()
            .map(|row| AttachmentRecord {
                path: row.path,
                public_url: row.public_url,
                size: Some(row.size),
                created_at: Some(row.created_at),
                // task_id carries the venue tab the uploader recorded
                group: row.task_id,
            })
            .collect())
    }
}

/// Lists the storage bucket and derives each object's public URL from the
/// configured base without any extra network call.
pub struct StorageSource {
    store: Arc<dyn ObjectStore>,
    public_base_url: String,
    bucket: String,
    prefix: String,
}

impl StorageSource {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        public_base_url: impl Into<String>,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            public_base_url: public_base_url.into(),
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl ReconcileSource for StorageSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Storage
    }

    async fn fetch(&self) -> Result<Vec<AttachmentRecord>, ServiceError> {
        let objects = self.store.list(&self.prefix).await?;
        Ok(objects
            .into_iter()
            .map(|object| {
                let public_url =
                    public_object_url(&self.public_base_url, &self.bucket, &object.name);
                AttachmentRecord {
                    path: object.name,
                    public_url: Some(public_url),
                    size: object.size,
                    created_at: object.created_at,
                    group: None,
                }
            })
            .collect())
    }
}

/// Reads the device-local upload cache. The cache itself never errors
/// (corrupt values read as empty), so this fetch is infallible in practice.
pub struct CacheSource {
    cache: UploadCache,
}

impl CacheSource {
    pub fn new(cache: UploadCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl ReconcileSource for CacheSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Cache
    }

    async fn fetch(&self) -> Result<Vec<AttachmentRecord>, ServiceError> {
        Ok(self
            .cache
            .read()
            .into_iter()
            .map(|entry| AttachmentRecord {
                path: entry.name,
                public_url: entry.public_url,
                size: entry.size,
                created_at: entry.created_at,
                group: entry.group,
            })
            .collect())
    }
}
