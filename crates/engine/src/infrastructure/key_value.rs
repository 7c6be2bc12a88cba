//! Key-value store adapters.
//!
//! - [`InMemoryStore`] - process-local, used by tests and when no data
//!   directory is configured.
//! - [`FileStore`] - one JSON file per key under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::infrastructure::ports::{PersistenceError, PersistencePort};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.entries.insert(key.into(), value.into());
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PersistencePort for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| PersistenceError::store("open", root.display(), e))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.root.join(format!("{file_name}.json"))
    }
}

impl PersistencePort for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::store("get", key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        // Written beside the target, then renamed over it.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| PersistenceError::store("set", key, e))?;
        fs::rename(&tmp, &path).map_err(|e| PersistenceError::store("set", key, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_round_trips() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("protectionAreas").unwrap(), None);
        store.set("protectionAreas", "[]").unwrap();
        assert_eq!(store.get("protectionAreas").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("systemConfig", r#"{"version":"3.0.0"}"#).unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            store.get("systemConfig").unwrap().as_deref(),
            Some(r#"{"version":"3.0.0"}"#)
        );
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn file_store_sanitises_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("../escape", "x").unwrap();
        assert!(dir.path().join("___escape.json").exists());
    }
}
