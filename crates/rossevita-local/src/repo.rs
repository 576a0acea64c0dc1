use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::{LocalError, LocalStorage};

/// Read-all/write-all repository for one locally persisted value
/// (an entity list, or the per-venue task map).
///
/// A missing or corrupt value loads as `T::default()`; partial salvage is
/// never attempted.
pub struct JsonRepository<T> {
    storage: Arc<dyn LocalStorage>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonRepository<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(storage: Arc<dyn LocalStorage>, key: &'static str) -> Self {
        Self {
            storage,
            key,
            _marker: PhantomData,
        }
    }

    pub fn load(&self) -> T {
        let raw = match self.storage.read(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!("read {} failed: {e}", self.key);
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("{} is corrupt, using default: {e}", self.key);
                T::default()
            }
        }
    }

    /// Like `load`, but persists `seed` on first use so defaults survive
    /// later edits (the event-type list works this way).
    pub fn load_or_seed(&self, seed: impl FnOnce() -> T) -> T {
        match self.storage.read(self.key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!("{} is corrupt, using default: {e}", self.key);
                    T::default()
                }
            },
            Ok(None) => {
                let value = seed();
                if let Err(e) = self.save(&value) {
                    warn!("seeding {} failed: {e}", self.key);
                }
                value
            }
            Err(e) => {
                warn!("read {} failed: {e}", self.key);
                T::default()
            }
        }
    }

    pub fn save(&self, value: &T) -> Result<(), LocalError> {
        self.storage.write(self.key, &serde_json::to_string(value)?)
    }
}
