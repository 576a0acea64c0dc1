mod cache;
mod port;
mod repo;

pub use cache::{UploadCache, UPLOAD_CACHE_KEY, UPLOAD_CACHE_LIMIT};
pub use port::{JsonFileStorage, LocalStorage, MemoryStorage};
pub use repo::JsonRepository;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
