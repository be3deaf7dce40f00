//! `window.localStorage` backend for the persistent store.

use acnhex_core::{KeyValueStore, Persist, StoreError};

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| StoreError::Backend {
            key: key.to_string(),
            message: e.as_string().unwrap_or_else(|| "quota exceeded or storage disabled".to_string()),
        })
    }

    fn remove(&self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}

/// Persistent store over localStorage, or an in-memory one when the browser
/// refuses storage (private mode, disabled cookies).
pub fn open() -> Persist {
    match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        Some(storage) => Persist::new(LocalStorage { storage }),
        None => {
            log::warn!("[STORE] localStorage unavailable, changes will not survive a reload");
            Persist::in_memory()
        }
    }
}
