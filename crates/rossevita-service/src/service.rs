use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use rossevita_core::attachment::{public_object_url, upload_object_key};
use rossevita_core::{AttachmentRecord, AttachmentRow, CachedUpload};
use rossevita_db::Db;
use rossevita_local::UploadCache;
use rossevita_store::ObjectStore;
use tracing::warn;

use crate::present::filter_by_group;
use crate::reconcile::Reconciler;
use crate::sources::{CacheSource, StorageSource, TableSource};
use crate::ServiceError;

#[derive(Debug, Clone)]
pub struct AttachmentConfig {
    /// Storage container name; part of every derived public URL.
    pub bucket: String,
    /// Listing prefix inside the bucket. Usually empty.
    pub prefix: String,
    /// Base for public URL derivation, e.g. `https://host/files`.
    pub public_base_url: String,
}

impl AttachmentConfig {
    pub fn new(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: String::new(),
            public_base_url: public_base_url.into(),
        }
    }
}

/// Upload and listing operations over the three attachment sources.
pub struct AttachmentService {
    db: Db,
    store: Arc<dyn ObjectStore>,
    cache: UploadCache,
    reconciler: Reconciler,
    config: AttachmentConfig,
}

impl AttachmentService {
    pub fn new(
        db: Db,
        store: Arc<dyn ObjectStore>,
        cache: UploadCache,
        config: AttachmentConfig,
    ) -> Self {
        let reconciler = Reconciler::new(
            Arc::new(TableSource::new(db.clone())),
            Arc::new(StorageSource::new(
                store.clone(),
                config.public_base_url.clone(),
                config.bucket.clone(),
                config.prefix.clone(),
            )),
            Arc::new(CacheSource::new(cache.clone())),
        );
        Self {
            db,
            store,
            cache,
            reconciler,
            config,
        }
    }

    /// Reconcile the three sources, then optionally present one group tab.
    pub async fn list(&self, group: Option<&str>) -> Vec<AttachmentRecord> {
        let records = self.reconciler.reconcile().await;
        match group {
            Some(group) => filter_by_group(&records, group),
            None => records,
        }
    }

    /// Upload one file.
    ///
    /// Storing the object is the only essential step; a failure there
    /// propagates and nothing is recorded anywhere. The metadata row and
    /// the cache entry are best-effort: their failures are logged and the
    /// upload still counts as succeeded, at worst with a delayed shared
    /// listing.
    pub async fn upload(
        &self,
        file_name: &str,
        mime_type: &str,
        group: Option<String>,
        data: Bytes,
    ) -> Result<AttachmentRecord, ServiceError> {
        let now = Utc::now();
        let key = upload_object_key(file_name, now)?;
        let size = data.len() as i64;

        self.store.put(&key, data).await?;

        let public_url = public_object_url(&self.config.public_base_url, &self.config.bucket, &key);

        let row = AttachmentRow {
            path: key.clone(),
            bucket: self.config.bucket.clone(),
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            size,
            public_url: Some(public_url.clone()),
            user_id: None,
            task_id: group.clone(),
            created_at: now,
        };
        if let Err(e) = self.db.upsert_attachment(&row) {
            warn!("attachment metadata insert failed (non-fatal): {e}");
        }

        let cached = CachedUpload {
            name: key.clone(),
            public_url: Some(public_url.clone()),
            size: Some(size),
            created_at: Some(now),
            group: group.clone(),
        };
        if let Err(e) = self.cache.append_if_absent(cached) {
            warn!("upload cache append failed (non-fatal): {e}");
        }

        Ok(AttachmentRecord {
            path: key,
            public_url: Some(public_url),
            size: Some(size),
            created_at: Some(now),
            group,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }
}
