//! Durable language preference.
//!
//! A [`Storage`] is a small synchronous key-value store, the equivalent of a
//! browser's local storage. [`PreferenceStore`] is the only reader and writer
//! of the language entry in it. Storage failures never reach callers: a
//! failed read behaves like a missing entry and a failed write is logged.

use crate::i18n::LanguageCode;
use serde_json::Map;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Storage key holding the selected language code.
pub const PREFERENCE_KEY: &str = "sakhi-language";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Synchronous string key-value storage.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage kept in a JSON object file.
///
/// The file is read on every access and replaced atomically on every write,
/// so values survive restarts and external edits are picked up.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Corrupt(e)) => {
                warn!(
                    "Overwriting corrupt storage file {}: {}",
                    self.path.display(),
                    e
                );
                Map::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(&map)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Storage that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// Reader/writer of the persisted language preference.
#[derive(Debug)]
pub struct PreferenceStore<S> {
    storage: S,
}

impl<S: Storage> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist `code`, overwriting any previous value.
    pub fn save(&mut self, code: LanguageCode) {
        match self.storage.set_item(PREFERENCE_KEY, code.code()) {
            Ok(()) => debug!("Saved language preference: {}", code),
            Err(e) => warn!("Failed to save language preference {}: {}", code, e),
        }
    }

    /// Read the stored language.
    ///
    /// Returns `None` when nothing is stored, the stored value is not a
    /// supported code, or storage cannot be read.
    pub fn load(&self) -> Option<LanguageCode> {
        let stored = match self.storage.get_item(PREFERENCE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read language preference: {}", e);
                return None;
            }
        };

        match LanguageCode::from_code(&stored) {
            Ok(code) => Some(code),
            Err(e) => {
                warn!("Ignoring stored language preference: {}", e);
                None
            }
        }
    }
}
