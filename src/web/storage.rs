//! `localStorage` binding with an in-memory fallback.

use web_sys::{Storage, Window};

use crate::error::{Error, Result};
use crate::store::{KeyValueStore, MemoryStore};

pub struct LocalStorage(Storage);

impl LocalStorage {
    pub fn open(window: &Window) -> Result<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self(storage)),
            _ => Err(Error::StorageUnavailable),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.0.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("localStorage read of {key} failed: {}", Error::from(err));
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.0.set_item(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<()> {
        Ok(self.0.remove_item(key)?)
    }
}

/// `localStorage` when available, otherwise page-lifetime memory.
pub enum BrowserStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open(window: &Window) -> Self {
        match LocalStorage::open(window) {
            Ok(local) => Self::Local(local),
            Err(err) => {
                log::warn!("{err}; preferences will not persist across reloads");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Local(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self {
            Self::Local(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }
}
