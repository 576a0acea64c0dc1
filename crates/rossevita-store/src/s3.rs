use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rossevita_core::StorageObject;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::Bucket;

use crate::{content_type_for_key, ObjectStore, StoreConfig, StoreError};

pub struct S3Store {
    bucket: Box<Bucket>,
}

impl std::fmt::Debug for S3Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Store").finish_non_exhaustive()
    }
}

impl S3Store {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let region = Region::Custom {
            region: config.region.clone().unwrap_or_else(|| "us-east-1".into()),
            endpoint: config.endpoint_url.clone().unwrap_or_default(),
        };

        let credentials = Credentials::new(
            config.access_key_id.as_deref(),
            config.secret_access_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StoreError::Internal(format!("credentials: {e}")))?;

        let bucket_name = config
            .bucket
            .as_deref()
            .ok_or_else(|| StoreError::Internal("bucket name required".into()))?;

        let mut bucket = Bucket::new(bucket_name, region, credentials)
            .map_err(|e| StoreError::Internal(format!("bucket: {e}")))?;
        bucket.set_path_style();

        Ok(Self { bucket })
    }
}

fn parse_last_modified(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn map_s3_error(e: S3Error) -> StoreError {
    StoreError::Internal(format!("s3: {e}"))
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, data: Bytes) -> Result<(), StoreError> {
        let content_type = content_type_for_key(key);
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(map_s3_error)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let response = self.bucket.get_object(key).await.map_err(map_s3_error)?;
        if response.status_code() == 404 {
            return Err(StoreError::NotFound(key.to_string()));
        }
        if response.status_code() >= 400 {
            return Err(StoreError::Internal(format!(
                "s3 get {}: status {}",
                key,
                response.status_code()
            )));
        }
        Ok(Bytes::from(response.to_vec()))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StorageObject>, StoreError> {
        let results = self
            .bucket
            .list(prefix.to_string(), None)
            .await
            .map_err(map_s3_error)?;

        let mut objects = Vec::new();
        for result in results {
            for object in result.contents {
                objects.push(StorageObject {
                    name: object.key,
                    size: Some(object.size as i64),
                    created_at: parse_last_modified(&object.last_modified),
                });
            }
        }
        objects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bucket_produces_error() {
        let config = StoreConfig {
            endpoint_url: Some("http://localhost:9000".into()),
            region: Some("us-east-1".into()),
            bucket: None,
            access_key_id: Some("key".into()),
            secret_access_key: Some("secret".into()),
            local_data_dir: None,
        };
        let err = S3Store::new(&config).unwrap_err();
        assert!(err.to_string().contains("bucket name required"));
    }

    #[test]
    fn valid_config_creates_store() {
        let config = StoreConfig {
            endpoint_url: Some("http://localhost:9000".into()),
            region: Some("us-east-1".into()),
            bucket: Some("uploads".into()),
            access_key_id: Some("key".into()),
            secret_access_key: Some("secret".into()),
            local_data_dir: None,
        };
        let store = S3Store::new(&config);
        assert!(store.is_ok());
    }

    #[test]
    fn last_modified_parses_rfc3339_or_none() {
        let parsed = parse_last_modified("2025-10-15T12:30:00Z").unwrap();
        assert_eq!(parsed.timestamp(), 1760531400);
        assert!(parse_last_modified("not a date").is_none());
    }

    // -- S3 integration tests (require a running MinIO/Garage) --

    fn s3_config() -> Option<StoreConfig> {
        let config = StoreConfig::from_env();
        if config.is_s3() {
            Some(config)
        } else {
            None
        }
    }

    #[tokio::test]
    #[ignore]
    async fn s3_put_get_list_roundtrip() {
        let config = s3_config().expect("S3 not configured — skipped via #[ignore]");
        let store = S3Store::new(&config).unwrap();
        let key = "integration-test/1730000000000_a.png";

        store.put(key, Bytes::from("png bytes")).await.unwrap();

        let data = store.get(key).await.unwrap();
        assert_eq!(data.as_ref(), b"png bytes");

        let objects = store.list("integration-test").await.unwrap();
        let found = objects.iter().find(|o| o.name == key).unwrap();
        assert_eq!(found.size, Some(9));
        assert!(found.created_at.is_some());
    }

    #[tokio::test]
    #[ignore]
    async fn s3_not_found() {
        let config = s3_config().expect("S3 not configured — skipped via #[ignore]");
        let store = S3Store::new(&config).unwrap();

        let err = store
            .get("integration-test/nonexistent-key-12345")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    #[ignore]
    async fn s3_list_empty_prefix() {
        let config = s3_config().expect("S3 not configured — skipped via #[ignore]");
        let store = S3Store::new(&config).unwrap();
        let objects = store
            .list("integration-test/guaranteed-empty-prefix-xyz")
            .await
            .unwrap();
        assert!(objects.is_empty());
    }
}
