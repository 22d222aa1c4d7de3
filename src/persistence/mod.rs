//! Key/value persistence
//!
//! Browser builds store strings in LocalStorage. Native builds and tests use
//! an in-memory map. Storage failures are logged and otherwise ignored; the
//! game never stops over them.

use std::collections::HashMap;

/// Minimal string store used for the best score and settings
pub trait KeyValueStore {
    /// Read a value, `None` if missing or unreadable
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value. Returns false if the write did not happen.
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory store (native builds, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.values.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open the window's LocalStorage. Private browsing modes may deny access,
    /// in which case every read misses and every write is dropped.
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, progress will not be saved");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        let Some(storage) = self.storage.as_ref() else {
            return false;
        };
        match storage.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write {key}: {e:?}");
                false
            }
        }
    }
}

/// The platform's default store
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> LocalStorage {
    LocalStorage::open()
}

/// The platform's default store
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> MemoryStore {
    MemoryStore::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        assert!(store.set("k", "v1"));
        assert!(store.set("k", "v2"));
        assert_eq!(store.get("k").as_deref(), Some("v2"));
    }
}
