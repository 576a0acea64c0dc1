mod present;
mod reconcile;
mod service;
mod sources;

pub use present::{filter_by_group, DEFAULT_GROUP};
pub use reconcile::{merge_layers, sort_records, Reconciler};
pub use service::{AttachmentConfig, AttachmentService};
pub use sources::{
    CacheSource, ReconcileSource, SourceKind, StorageSource, TableSource, SOURCE_PRECEDENCE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<rossevita_db::DbError> for ServiceError {
    fn from(e: rossevita_db::DbError) -> Self {
        match e {
            rossevita_db::DbError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<rossevita_store::StoreError> for ServiceError {
    fn from(e: rossevita_store::StoreError) -> Self {
        match e {
            rossevita_store::StoreError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<rossevita_core::CoreError> for ServiceError {
    fn from(e: rossevita_core::CoreError) -> Self {
        match e {
            rossevita_core::CoreError::NotFound(msg) => ServiceError::NotFound(msg),
            rossevita_core::CoreError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
        }
    }
}

impl From<rossevita_local::LocalError> for ServiceError {
    fn from(e: rossevita_local::LocalError) -> Self {
        ServiceError::Internal(e.to_string())
    }
}
