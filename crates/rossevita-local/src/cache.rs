use std::sync::Arc;

use rossevita_core::CachedUpload;
use tracing::warn;

use crate::{LocalError, LocalStorage};

/// Fixed storage key for the device-local upload list.
pub const UPLOAD_CACHE_KEY: &str = "uploaded_files";

/// Maximum number of cached upload descriptors kept, most recent first.
pub const UPLOAD_CACHE_LIMIT: usize = 200;

/// Bounded, append-only, dedup-by-path list of recently uploaded files.
///
/// The cache is the optimistic-update fallback: it makes an upload visible
/// in listings before the shared table and storage listings have caught up.
/// A corrupt or missing value reads as empty, never as an error.
#[derive(Clone)]
pub struct UploadCache {
    storage: Arc<dyn LocalStorage>,
}

impl UploadCache {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// All cached entries, most recent first. Corrupt JSON discards the
    /// whole cached value for this read.
    pub fn read(&self) -> Vec<CachedUpload> {
        let raw = match self.storage.read(UPLOAD_CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("upload cache read failed: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("upload cache is corrupt, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Record a new upload. An insert for an already-present path is a
    /// no-op (not a replace-and-move-to-front). The list is truncated to
    /// `UPLOAD_CACHE_LIMIT` entries.
    pub fn append_if_absent(&self, entry: CachedUpload) -> Result<(), LocalError> {
        let mut entries = self.read();
        if entries.iter().any(|e| e.name == entry.name) {
            return Ok(());
        }
        entries.insert(0, entry);
        entries.truncate(UPLOAD_CACHE_LIMIT);
        self.storage
            .write(UPLOAD_CACHE_KEY, &serde_json::to_string(&entries)?)
    }
}
