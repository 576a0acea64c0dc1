use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::LocalError;

/// Whole-value key/value storage for device-local state.
///
/// Mirrors the read-all/write-all shape of browser local storage so the
/// repositories and the upload cache stay testable without a real disk.
pub trait LocalStorage: Send + Sync {
    /// Read the full value under `key`. `None` when the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>, LocalError>;

    /// Replace the full value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), LocalError>;
}

/// One JSON file per key under a base directory.
pub struct JsonFileStorage {
    base_dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl LocalStorage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, LocalError> {
        match std::fs::read_to_string(self.resolve(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), LocalError> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::write(self.resolve(key), value)?;
        Ok(())
    }
}

/// In-memory storage for tests.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, LocalError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), LocalError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
