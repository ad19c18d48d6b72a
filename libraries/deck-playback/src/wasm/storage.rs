//! `localStorage` key-value store

use deck_core::{DeckError, KeyValueStore, Result};
use web_sys::Storage;

/// Store backed by the page's `localStorage`
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the current window's `localStorage`
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| DeckError::storage("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| DeckError::storage(format!("{e:?}")))?
            .ok_or_else(|| DeckError::storage("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| DeckError::storage(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| DeckError::storage(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| DeckError::storage(format!("{e:?}")))
    }
}
