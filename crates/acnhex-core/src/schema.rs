//! Versioned Persistence Schemas
//!
//! Stored documents are upgraded through a fixed chain of steps
//! (`v0 -> v1 -> v2` for wishlists, `v0 -> v1` for the cart) before they are
//! decoded. A document already at the current version passes through
//! untouched, which makes every migration idempotent.
//!
//! Wishlist versions:
//! - v0: flat array of plain item identifiers (`[12, "40"]`)
//! - v1: flat array of `{id, variantIdx}` references
//! - v2: `{version: 2, lists: [...]}`, the v1 array becoming "Loved Items"
//!
//! Cart versions:
//! - v0: bare array of lines, one line per add, `qty` optional. Lines from the
//!   oldest builds carry `{name, filename, variation, hexId, hexIdFull, image,
//!   quantity}` and no id.
//! - v1: `{version: 1, entries: [...]}` with one line per `(id, variantIdx)`
//!
//! Entries a step cannot carry over are counted in `Migrated::dropped`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::cart::Cart;
use crate::error::SchemaError;
use crate::models::{CartEntry, ItemId, ItemRef, UNLINKED_ID_BASE};
use crate::wishlist::{WishlistList, Wishlists, DEFAULT_LIST_ID, DEFAULT_LIST_NAME};

pub const WISHLIST_VERSION: u64 = 2;
pub const CART_VERSION: u64 = 1;

/// A decoded document plus whether it had to be upgraded, and how many stored
/// entries were lost on the way. Only a lossless upgrade should be written back.
#[derive(Debug, Clone, PartialEq)]
pub struct Migrated<T> {
    pub value: T,
    pub upgraded: bool,
    pub dropped: usize,
}

#[derive(Serialize, Deserialize)]
struct WishlistDoc {
    version: u64,
    lists: Vec<WishlistList>,
}

#[derive(Serialize, Deserialize)]
struct CartDoc {
    version: u64,
    entries: Vec<CartEntry>,
}

// ========================
// Wishlist
// ========================

fn wishlist_version(raw: &Value) -> Result<u64, SchemaError> {
    match raw {
        Value::Array(items) => {
            let legacy = items.iter().any(|v| v.is_number() || v.is_string());
            Ok(if legacy { 0 } else { 1 })
        }
        Value::Object(map) if map.contains_key("lists") => {
            let version = map.get("version").and_then(Value::as_u64).unwrap_or(WISHLIST_VERSION);
            if version > WISHLIST_VERSION {
                Err(SchemaError::FutureVersion { what: "wishlist", version })
            } else {
                Ok(WISHLIST_VERSION)
            }
        }
        _ => Err(SchemaError::Unrecognised { what: "wishlist" }),
    }
}

fn legacy_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Plain identifiers become `{id, variantIdx: 0}`; objects pass through.
fn wishlist_v0_to_v1(raw: Value, dropped: &mut usize) -> Value {
    let Value::Array(items) = raw else { return raw };
    let upgraded: Vec<Value> = items
        .into_iter()
        .filter_map(|item| match legacy_id(&item) {
            Some(id) => Some(json!({ "id": id, "variantIdx": 0 })),
            None if item.is_object() => Some(item),
            None => {
                log::warn!("[SCHEMA] dropping unreadable wishlist entry {}", item);
                *dropped += 1;
                None
            }
        })
        .collect();
    Value::Array(upgraded)
}

/// The flat list becomes the default list of a multi-list document.
/// `{name, filename}` records have no id to link and are counted as dropped.
fn wishlist_v1_to_v2(raw: Value, dropped: &mut usize) -> Value {
    let Value::Array(items) = raw else { return raw };
    let mut refs: Vec<ItemRef> = Vec::new();
    for item in items {
        match serde_json::from_value::<ItemRef>(item) {
            Ok(r) if !refs.contains(&r) => refs.push(r),
            Ok(_) => {}
            Err(e) => {
                log::warn!("[SCHEMA] dropping wishlist reference: {}", e);
                *dropped += 1;
            }
        }
    }
    json!({
        "version": WISHLIST_VERSION,
        "lists": [{ "id": DEFAULT_LIST_ID, "name": DEFAULT_LIST_NAME, "items": refs }],
    })
}

const WISHLIST_STEPS: [fn(Value, &mut usize) -> Value; 2] = [wishlist_v0_to_v1, wishlist_v1_to_v2];

pub fn migrate_wishlist(raw: Value) -> Result<Migrated<Wishlists>, SchemaError> {
    let from = wishlist_version(&raw)?;
    let mut doc = raw;
    let mut dropped = 0;
    for step in &WISHLIST_STEPS[from as usize..] {
        doc = step(doc, &mut dropped);
    }
    let decoded: WishlistDoc =
        serde_json::from_value(doc).map_err(|_| SchemaError::Unrecognised { what: "wishlist" })?;
    Ok(Migrated {
        value: Wishlists::from_lists(decoded.lists),
        upgraded: from < WISHLIST_VERSION,
        dropped,
    })
}

pub fn encode_wishlist(lists: &Wishlists) -> Value {
    json!({ "version": WISHLIST_VERSION, "lists": lists.lists() })
}

// ========================
// Cart
// ========================

fn cart_version(raw: &Value) -> Result<u64, SchemaError> {
    match raw {
        Value::Array(_) => Ok(0),
        Value::Object(map) if map.contains_key("entries") => {
            let version = map.get("version").and_then(Value::as_u64).unwrap_or(CART_VERSION);
            if version > CART_VERSION {
                Err(SchemaError::FutureVersion { what: "cart", version })
            } else {
                Ok(CART_VERSION)
            }
        }
        _ => Err(SchemaError::Unrecognised { what: "cart" }),
    }
}

/// Cart line written before catalog ids existed
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCartLine {
    name: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    variation: String,
    #[serde(default)]
    hex_id: String,
    #[serde(default)]
    hex_id_full: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    quantity: Option<u32>,
}

/// Hands out unlinked ids, one per distinct legacy line identity.
#[derive(Default)]
struct UnlinkedIds {
    seen: Vec<String>,
}

impl UnlinkedIds {
    fn id_for(&mut self, identity: &str) -> ItemId {
        let idx = match self.seen.iter().position(|s| s == identity) {
            Some(idx) => idx,
            None => {
                self.seen.push(identity.to_string());
                self.seen.len() - 1
            }
        };
        UNLINKED_ID_BASE.saturating_add(idx as ItemId)
    }
}

fn legacy_cart_line(line: LegacyCartLine, ids: &mut UnlinkedIds) -> Option<CartEntry> {
    let hex = if line.hex_id_full.trim().is_empty() { line.hex_id } else { line.hex_id_full };
    let hex = hex.trim().to_string();
    if hex.is_empty() {
        return None;
    }
    let identity = if line.filename.is_empty() { hex.clone() } else { line.filename };
    let variant_label = if line.variation == "NA" { String::new() } else { line.variation };
    Some(CartEntry {
        id: ids.id_for(&identity),
        variant_idx: 0,
        name: line.name,
        variant_label,
        hex,
        image: line.image,
        qty: line.quantity.unwrap_or(1).max(1),
    })
}

fn cart_v0_to_v1(raw: Value, dropped: &mut usize) -> Value {
    let Value::Array(lines) = raw else { return raw };
    let mut ids = UnlinkedIds::default();
    let mut entries = Vec::new();
    for line in lines {
        if let Ok(entry) = serde_json::from_value::<CartEntry>(line.clone()) {
            entries.push(entry);
            continue;
        }
        match serde_json::from_value::<LegacyCartLine>(line).ok().and_then(|l| legacy_cart_line(l, &mut ids)) {
            Some(entry) => entries.push(entry),
            None => {
                log::warn!("[SCHEMA] dropping unreadable cart line");
                *dropped += 1;
            }
        }
    }
    let cart = Cart::from_entries(entries);
    json!({ "version": CART_VERSION, "entries": cart.entries() })
}

pub fn migrate_cart(raw: Value) -> Result<Migrated<Cart>, SchemaError> {
    let from = cart_version(&raw)?;
    let mut dropped = 0;
    let doc = if from == 0 { cart_v0_to_v1(raw, &mut dropped) } else { raw };
    let decoded: CartDoc =
        serde_json::from_value(doc).map_err(|_| SchemaError::Unrecognised { what: "cart" })?;
    Ok(Migrated {
        value: Cart::from_entries(decoded.entries),
        upgraded: from < CART_VERSION,
        dropped,
    })
}

pub fn encode_cart(cart: &Cart) -> Value {
    json!({ "version": CART_VERSION, "entries": cart.entries() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v0_identifiers_become_loved_items() {
        let migrated = migrate_wishlist(json!([12, "40", 12])).unwrap();
        assert!(migrated.upgraded);
        let loved = migrated.value.default_list();
        assert_eq!(loved.name, DEFAULT_LIST_NAME);
        assert_eq!(loved.items, vec![ItemRef::new(12, 0), ItemRef::new(40, 0)]);
    }

    #[test]
    fn test_v1_refs_keep_variant() {
        let raw = json!([{ "id": 3, "variantIdx": 2 }, { "id": 4 }]);
        let migrated = migrate_wishlist(raw).unwrap();
        assert!(migrated.upgraded);
        assert_eq!(
            migrated.value.default_list().items,
            vec![ItemRef::new(3, 2), ItemRef::new(4, 0)]
        );
    }

    #[test]
    fn test_migrating_migrated_wishlist_is_noop() {
        let first = migrate_wishlist(json!([1, 2, 3])).unwrap();
        let encoded = encode_wishlist(&first.value);

        let second = migrate_wishlist(encoded.clone()).unwrap();
        assert!(!second.upgraded);
        assert_eq!(second.value, first.value);
        assert_eq!(encode_wishlist(&second.value), encoded);
    }

    #[test]
    fn test_future_and_garbage_wishlists_are_rejected() {
        let future = json!({ "version": 9, "lists": [] });
        assert_eq!(
            migrate_wishlist(future),
            Err(SchemaError::FutureVersion { what: "wishlist", version: 9 })
        );
        assert!(migrate_wishlist(json!("loved")).is_err());
    }

    #[test]
    fn test_empty_documents_decode_through_repair() {
        let lists = migrate_wishlist(json!({ "version": 2, "lists": [] })).unwrap().value;
        assert_eq!(lists.default_list().name, DEFAULT_LIST_NAME);

        let line = json!({ "id": 1, "name": "Chair", "hex": "0A3F", "qty": 60 });
        let cart = migrate_cart(json!({ "version": 1, "entries": [line] })).unwrap().value;
        assert_eq!(cart.total(), crate::CART_CAPACITY);
    }

    #[test]
    fn test_legacy_cart_folds_one_line_per_add() {
        let raw = json!([
            { "id": 1, "variantIdx": 0, "name": "Chair", "hex": "0A3F" },
            { "id": 1, "variantIdx": 0, "name": "Chair", "hex": "0A3F" },
            { "id": 2, "name": "Lamp", "hex": "1B2C", "qty": 3 },
        ]);
        let migrated = migrate_cart(raw).unwrap();
        assert!(migrated.upgraded);
        let cart = migrated.value;
        assert_eq!(cart.entries().len(), 2);
        assert_eq!(cart.quantity_of(ItemRef::new(1, 0)), 2);
        assert_eq!(cart.total(), 5);

        let again = migrate_cart(encode_cart(&cart)).unwrap();
        assert!(!again.upgraded);
        assert_eq!(again.value, cart);
    }

    #[test]
    fn test_id_less_cart_lines_keep_hex_and_quantity() {
        let raw = json!([
            { "name": "Wooden Chair", "filename": "FtrChairWood_Remake_0_0", "variation": "Natural",
              "hexId": "0A3F", "hexIdFull": "0A3F0000", "image": "chair.png", "quantity": 3 },
            { "name": "Lamp", "filename": "FtrLamp", "variation": "NA", "hexId": "1B2C", "image": "lamp.png", "quantity": 1 },
            { "name": "Broken" },
        ]);
        let migrated = migrate_cart(raw).unwrap();
        assert_eq!(migrated.dropped, 1);
        let cart = migrated.value;
        assert_eq!(cart.total(), 4);
        assert_eq!(cart.entries()[0].hex, "0A3F0000");
        assert_eq!(cart.entries()[0].variant_label, "Natural");
        assert_eq!(cart.entries()[1].variant_label, "");
        assert!(cart.entries().iter().all(|e| e.id >= UNLINKED_ID_BASE));
        assert_ne!(cart.entries()[0].id, cart.entries()[1].id);
        assert_eq!(
            crate::generate_command("!", cart.entries()),
            "!order 0A3F0000, 0A3F0000, 0A3F0000, 1B2C"
        );
    }

    #[test]
    fn test_filename_wishlist_records_are_counted_as_dropped() {
        let raw = json!([{ "name": "Wooden Chair", "filename": "FtrChairWood_Remake_0_0" }, { "id": 5 }]);
        let migrated = migrate_wishlist(raw).unwrap();
        assert!(migrated.upgraded);
        assert_eq!(migrated.dropped, 1);
        assert_eq!(migrated.value.default_list().items, vec![ItemRef::new(5, 0)]);
    }
}
