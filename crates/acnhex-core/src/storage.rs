//! Persistent Store
//!
//! Typed JSON values over a string key-value backend (browser `localStorage`
//! in the app, `MemoryStore` in tests). Reads never fail: a missing or
//! corrupt entry yields the documented default.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cart::Cart;
use crate::command::normalize_prefix;
use crate::error::StoreError;
use crate::models::{LoadMode, Settings, DEFAULT_PREFIX};
use crate::schema;
use crate::wishlist::Wishlists;

pub const KEY_CART: &str = "acnhex_cart";
pub const KEY_WISHLIST: &str = "acnhex_wishlist";
pub const KEY_PREFIX: &str = "acnhex_prefix";
pub const KEY_FIRST_RUN_SEEN: &str = "acnhex_first_run_seen";
pub const KEY_LOAD_MODE: &str = "acnhex_load_mode";
/// Untouched copies of documents an upgrade could not fully carry over
pub const KEY_CART_UNMIGRATED: &str = "acnhex_cart_unmigrated";
pub const KEY_WISHLIST_UNMIGRATED: &str = "acnhex_wishlist_unmigrated";

pub const ALL_KEYS: [&str; 7] = [
    KEY_CART,
    KEY_WISHLIST,
    KEY_PREFIX,
    KEY_FIRST_RUN_SEEN,
    KEY_LOAD_MODE,
    KEY_CART_UNMIGRATED,
    KEY_WISHLIST_UNMIGRATED,
];

/// String key-value backend
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str);
}

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.values.borrow_mut().insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

pub struct Persist {
    backend: Box<dyn KeyValueStore>,
}

impl Persist {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self { backend: Box::new(backend) }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn raw(&self, key: &str) -> Option<Value> {
        let text = self.backend.get(key)?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[STORE] ignoring corrupt {}: {}", key, e);
                None
            }
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.raw(key).map(serde_json::from_value) {
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                log::warn!("[STORE] {} has an unexpected shape: {}", key, e);
                default
            }
            None => default,
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)
            .map_err(|source| StoreError::Serialize { key: key.to_string(), source })?;
        self.backend.set(key, &text)
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }

    pub fn clear_all(&self) {
        for key in ALL_KEYS {
            self.backend.remove(key);
        }
    }

    /// Copy the stored text of `key` to `backup` unless a copy already exists.
    fn keep_unmigrated(&self, key: &str, backup: &str, dropped: usize) {
        log::warn!("[STORE] {} stored {} entries could not be upgraded; original kept in {}", dropped, key, backup);
        if self.backend.get(backup).is_some() {
            return;
        }
        if let Some(text) = self.backend.get(key) {
            if let Err(e) = self.backend.set(backup, &text) {
                log::warn!("[STORE] could not back up {}: {}", key, e);
            }
        }
    }

    // ========================
    // Cart
    // ========================

    pub fn load_cart(&self) -> Cart {
        let Some(raw) = self.raw(KEY_CART) else {
            return Cart::new();
        };
        match schema::migrate_cart(raw) {
            Ok(migrated) => {
                if migrated.dropped > 0 {
                    self.keep_unmigrated(KEY_CART, KEY_CART_UNMIGRATED, migrated.dropped);
                } else if migrated.upgraded {
                    log::info!("[STORE] upgraded stored cart to v{}", schema::CART_VERSION);
                    if let Err(e) = self.save_cart(&migrated.value) {
                        log::warn!("[STORE] could not write upgraded cart: {}", e);
                    }
                }
                migrated.value
            }
            Err(e) => {
                log::warn!("[STORE] {}; starting with an empty cart", e);
                Cart::new()
            }
        }
    }

    pub fn save_cart(&self, cart: &Cart) -> Result<(), StoreError> {
        self.set(KEY_CART, &schema::encode_cart(cart))
    }

    // ========================
    // Wishlists
    // ========================

    pub fn load_wishlists(&self) -> Wishlists {
        let Some(raw) = self.raw(KEY_WISHLIST) else {
            return Wishlists::new();
        };
        match schema::migrate_wishlist(raw) {
            Ok(migrated) => {
                if migrated.dropped > 0 {
                    self.keep_unmigrated(KEY_WISHLIST, KEY_WISHLIST_UNMIGRATED, migrated.dropped);
                } else if migrated.upgraded {
                    log::info!("[STORE] upgraded stored wishlist to v{}", schema::WISHLIST_VERSION);
                    if let Err(e) = self.save_wishlists(&migrated.value) {
                        log::warn!("[STORE] could not write upgraded wishlist: {}", e);
                    }
                }
                migrated.value
            }
            Err(e) => {
                log::warn!("[STORE] {}; starting with an empty wishlist", e);
                Wishlists::new()
            }
        }
    }

    pub fn save_wishlists(&self, lists: &Wishlists) -> Result<(), StoreError> {
        self.set(KEY_WISHLIST, &schema::encode_wishlist(lists))
    }

    // ========================
    // Settings
    // ========================

    /// Older builds stored the prefix as raw text including the `order`
    /// keyword (`*order`). Such values are normalized and written back.
    pub fn load_prefix(&self) -> String {
        let Some(text) = self.backend.get(KEY_PREFIX) else {
            return DEFAULT_PREFIX.to_string();
        };
        if let Ok(Value::String(stored)) = serde_json::from_str::<Value>(&text) {
            if stored == normalize_prefix(&stored) {
                return stored;
            }
        }
        let legacy = match serde_json::from_str::<Value>(&text) {
            Ok(Value::String(s)) => s,
            _ => text,
        };
        let prefix = normalize_prefix(&legacy);
        log::info!("[STORE] upgraded stored prefix {:?} to {:?}", legacy, prefix);
        if let Err(e) = self.save_prefix(&prefix) {
            log::warn!("[STORE] could not write upgraded prefix: {}", e);
        }
        prefix
    }

    pub fn load_settings(&self) -> Settings {
        Settings {
            prefix: self.load_prefix(),
            load_mode: self.get(KEY_LOAD_MODE, LoadMode::default()),
            first_run_seen: self.get(KEY_FIRST_RUN_SEEN, false),
        }
    }

    pub fn save_prefix(&self, prefix: &str) -> Result<(), StoreError> {
        self.set(KEY_PREFIX, &normalize_prefix(prefix))
    }

    pub fn save_load_mode(&self, mode: LoadMode) -> Result<(), StoreError> {
        self.set(KEY_LOAD_MODE, &mode)
    }

    pub fn save_first_run_seen(&self) -> Result<(), StoreError> {
        self.set(KEY_FIRST_RUN_SEEN, &true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemRef;

    #[test]
    fn test_missing_and_corrupt_entries_use_defaults() {
        let persist = Persist::new(MemoryStore::with(&[
            (KEY_CART, "{not json"),
            (KEY_LOAD_MODE, "\"sideways\""),
        ]));
        assert!(persist.load_cart().is_empty());
        assert_eq!(persist.load_wishlists(), Wishlists::new());
        assert_eq!(persist.load_settings(), Settings::default());
    }

    #[test]
    fn test_wishlist_migration_is_written_back_once() {
        let persist = Persist::new(MemoryStore::with(&[(KEY_WISHLIST, "[7, 8]")]));
        let lists = persist.load_wishlists();
        assert!(lists.is_loved(ItemRef::new(7, 0)));

        let stored: Value = persist.get(KEY_WISHLIST, Value::Null);
        assert_eq!(stored["version"], 2);

        // second load sees the v2 document and yields the same lists
        assert_eq!(persist.load_wishlists(), lists);
    }

    #[test]
    fn test_legacy_raw_prefix_is_upgraded() {
        let persist = Persist::new(MemoryStore::with(&[(KEY_PREFIX, "*order")]));
        assert_eq!(persist.load_prefix(), "*");
        let stored: Value = persist.get(KEY_PREFIX, Value::Null);
        assert_eq!(stored, Value::String("*".to_string()));

        let line = crate::models::CartEntry {
            id: 1,
            variant_idx: 0,
            name: "Chair".to_string(),
            variant_label: String::new(),
            hex: "0A3F".to_string(),
            image: String::new(),
            qty: 1,
        };
        assert_eq!(crate::generate_command(&persist.load_prefix(), &[line]), "*order 0A3F");

        persist.save_prefix("  $ ").unwrap();
        assert_eq!(persist.load_prefix(), "$");
    }

    #[test]
    fn test_id_less_documents_are_not_overwritten() {
        let cart = r#"[{"name":"Wooden Chair","filename":"FtrChairWood","variation":"Natural","hexId":"0A3F","hexIdFull":"0A3F","image":"c.png","quantity":2},{"name":"Lamp","filename":"FtrLamp","variation":"NA","hexId":"1B2C","image":"l.png","quantity":1},{"bogus":true}]"#;
        let wishlist = r#"[{"name":"Wooden Chair","filename":"FtrChairWood"}]"#;
        let persist = Persist::new(MemoryStore::with(&[(KEY_CART, cart), (KEY_WISHLIST, wishlist)]));

        let loaded = persist.load_cart();
        assert_eq!(loaded.total(), 3);
        assert_eq!(crate::generate_command("!", loaded.entries()), "!order 0A3F, 0A3F, 1B2C");
        assert_eq!(persist.backend.get(KEY_CART).as_deref(), Some(cart));
        assert_eq!(persist.backend.get(KEY_CART_UNMIGRATED).as_deref(), Some(cart));

        assert_eq!(persist.load_wishlists(), Wishlists::new());
        assert_eq!(persist.backend.get(KEY_WISHLIST).as_deref(), Some(wishlist));
        assert_eq!(persist.backend.get(KEY_WISHLIST_UNMIGRATED).as_deref(), Some(wishlist));

        // a later save replaces the live key; the backup survives
        persist.save_cart(&loaded).unwrap();
        assert_eq!(persist.load_cart(), loaded);
        assert_eq!(persist.backend.get(KEY_CART_UNMIGRATED).as_deref(), Some(cart));
    }

    #[test]
    fn test_settings_round_trip_and_clear_all() {
        let persist = Persist::in_memory();
        persist.save_load_mode(LoadMode::Continuous).unwrap();
        persist.save_first_run_seen().unwrap();
        let settings = persist.load_settings();
        assert_eq!(settings.load_mode, LoadMode::Continuous);
        assert!(settings.first_run_seen);

        persist.clear_all();
        assert_eq!(persist.load_settings(), Settings::default());
    }
}
