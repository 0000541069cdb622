use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsValue;

use crate::error::StorageError;

/// Synchronous string key-value storage, shaped after `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        // `localStorage` throws when the user has disabled site data.
        let inner = window
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(js_error)
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Either backend, picked once at startup.
pub enum AnyStorage {
    Browser(BrowserStorage),
    Memory(MemoryStorage),
}

impl AnyStorage {
    pub fn detect() -> Self {
        match BrowserStorage::local() {
            Ok(storage) => Self::Browser(storage),
            Err(err) => {
                tracing::warn!(%err, "falling back to in-memory notes for this session");
                Self::Memory(MemoryStorage::default())
            }
        }
    }
}

impl KeyValueStore for AnyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Browser(storage) => storage.get_item(key),
            Self::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Browser(storage) => storage.set_item(key, value),
            Self::Memory(storage) => storage.set_item(key, value),
        }
    }
}
