//! Durable key/value storage
//!
//! The console keeps a handful of string values (the session token above all)
//! across process restarts. [`FileStorage`] persists them as a JSON object in
//! the state directory; [`MemoryStorage`] keeps them for the lifetime of the
//! value and is what tests inject.

use crate::CoreResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

const STORAGE_FILE: &str = "storage.json";

/// String key/value store with local-storage semantics
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get_item(&self, key: &str) -> CoreResult<Option<String>>;

    /// Insert or overwrite a value
    fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a value; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> CoreResult<()>;
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        self.items().remove(key);
        Ok(())
    }
}

/// Storage backed by `<dir>/storage.json`
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a crash never leaves a truncated document behind. Reads go to
/// disk each time; another process writing the same file is picked up.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open storage in `dir`, creating the directory when missing
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub fn open(dir: impl AsRef<Path>) -> CoreResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(STORAGE_FILE);
        debug!(path = %path.display(), "Opened file storage");
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> CoreResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> CoreResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items = self.read_all()?;
        if f(&mut items) {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        self.update(|items| items.remove(key).is_some())
    }
}
