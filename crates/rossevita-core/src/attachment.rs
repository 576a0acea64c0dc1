use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The unified read-model produced by reconciliation.
///
/// Synthesized fresh on every reconcile call; never persisted as its own
/// entity. `path` is the merge key across all three sources and is unique
/// within a merged result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Client-only categorization label (which venue tab the file belongs to).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl AttachmentRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            public_url: None,
            size: None,
            created_at: None,
            group: None,
        }
    }
}

/// A row of the durable `attachments` metadata table, written best-effort at
/// upload time. `path` is the natural key for upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentRow {
    pub path: String,
    pub bucket: String,
    pub file_name: String,
    pub mime_type: String,
    pub size: i64,
    pub public_url: Option<String>,
    pub user_id: Option<String>,
    pub task_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An object as reported by the remote storage listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageObject {
    pub name: String,
    pub size: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A device-local descriptor recorded after a successful upload, so the file
/// is visible before the shared listings catch up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedUpload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Derive the storage object key for an upload: `{unixMillis}_{name}` with
/// whitespace in the original name replaced by underscores.
pub fn upload_object_key(file_name: &str, at: DateTime<Utc>) -> Result<String, CoreError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput("empty file name".into()));
    }
    let sanitized: String = trimmed
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    Ok(format!("{}_{}", at.timestamp_millis(), sanitized))
}

/// Public URL for an object in a public bucket: `{base}/{bucket}/{key}`.
/// Pure and idempotent; no network call involved.
pub fn public_object_url(base: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), bucket, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn object_key_prefixes_millis_and_sanitizes_whitespace() {
        let at = Utc.with_ymd_and_hms(2025, 11, 5, 12, 0, 0).unwrap();
        let key = upload_object_key("factura octubre 2025.pdf", at).unwrap();
        assert_eq!(
            key,
            format!("{}_factura_octubre_2025.pdf", at.timestamp_millis())
        );
    }

    #[test]
    fn object_key_rejects_empty_name() {
        let err = upload_object_key("   ", Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn object_key_handles_tabs_and_repeated_spaces() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let key = upload_object_key("a  b\tc.png", at).unwrap();
        assert!(key.ends_with("_a__b_c.png"));
    }

    #[test]
    fn public_url_joins_base_bucket_and_key() {
        assert_eq!(
            public_object_url("https://host", "uploads", "a.png"),
            "https://host/uploads/a.png"
        );
        // Trailing slash on the base does not double up
        assert_eq!(
            public_object_url("https://host/", "uploads", "a.png"),
            "https://host/uploads/a.png"
        );
    }

    #[test]
    fn public_url_is_idempotent() {
        let first = public_object_url("https://host", "uploads", "1_x.pdf");
        let second = public_object_url("https://host", "uploads", "1_x.pdf");
        assert_eq!(first, second);
    }
}
