//! Key-value persistence
//!
//! The game persists two things: the high score (an integer under
//! `"highScore"`) and the player's settings (JSON). Both go through
//! [`KeyValueStore`]; the browser backend is LocalStorage, tests and the
//! native build use [`MemoryStore`].

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// String key-value storage supplied by the host
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);

    /// Integer stored under `key`; unparseable values read as absent
    fn get_int(&self, key: &str) -> Option<u64> {
        let raw = self.get_item(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring non-integer value {:?} under {:?}", raw, key);
                None
            }
        }
    }

    fn set_int(&mut self, key: &str, value: u64) {
        self.set_item(key, &value.to_string());
    }

    /// JSON document stored under `key`; malformed documents read as absent
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let raw = self.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed {:?}: {}", key, e);
                None
            }
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T)
    where
        Self: Sized,
    {
        match serde_json::to_string(value) {
            Ok(json) => self.set_item(key, &json),
            Err(e) => log::warn!("Failed to serialize {:?}: {}", key, e),
        }
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - nothing will be persisted");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write {:?} to LocalStorage", key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_round_trip_and_garbage() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int("highScore"), None);

        store.set_int("highScore", 120);
        assert_eq!(store.get_int("highScore"), Some(120));
        assert_eq!(store.get_item("highScore").as_deref(), Some("120"));

        store.set_item("highScore", "not a number");
        assert_eq!(store.get_int("highScore"), None);
    }

    #[test]
    fn test_malformed_json_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set_item("doc", "{ broken");
        assert_eq!(store.get_json::<Vec<u32>>("doc"), None);

        store.set_json("doc", &vec![1u32, 2, 3]);
        assert_eq!(store.get_json::<Vec<u32>>("doc"), Some(vec![1, 2, 3]));
    }
}
