//! Typed access over a key-value store.

use crate::{FileStore, KeyValueStore, MemoryStore, StoreError};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Type-safe cache over a [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug)]
pub struct Cache<S> {
    store: S,
}

impl Cache<MemoryStore> {
    /// Cache over a fresh in-memory store.
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Cache<FileStore> {
    /// Cache over the JSON document at `path`.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(FileStore::open(path)?))
    }
}

impl<S: KeyValueStore> Cache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.store.get_raw(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.store.set_raw(key, &json)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.store.keys()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct License {
        name: String,
        key: String,
        activated: bool,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::memory();
        let license = License {
            name: "Mi Tienda".into(),
            key: "ABCD-1234".into(),
            activated: true,
        };

        cache.set("license", &license).unwrap();
        assert_eq!(cache.get::<License>("license").unwrap(), Some(license));
        assert_eq!(cache.keys().unwrap(), vec!["license"]);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let cache = Cache::memory();
        cache.set("license", &42).unwrap();
        assert!(matches!(
            cache.get::<License>("license"),
            Err(StoreError::SerializeError(_))
        ));
    }

    #[test]
    fn test_missing_key() {
        let cache = Cache::memory();
        assert_eq!(cache.get::<License>("license").unwrap(), None);
        cache.delete("license").unwrap();
    }

    #[test]
    fn test_file_backed_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        {
            let cache = Cache::open_file(&path).unwrap();
            cache.set("pos-user", &vec!["a", "b"]).unwrap();
        }
        let cache = Cache::open_file(&path).unwrap();
        assert_eq!(
            cache.get::<Vec<String>>("pos-user").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(cache.store().path(), path.as_path());
    }
}
