//! Catalog and Order Models
//!
//! Data structures matching the static catalog files and the persisted
//! cart/wishlist records.

use serde::{Deserialize, Serialize};

pub type ItemId = u32;

/// Category entry from the catalog index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

/// Compact one-row-per-item summary from the catalog index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: ItemId,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub primary_variant_label: String,
    pub hex: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The lightweight catalog index (`data/index.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogIndex {
    pub categories: Vec<Category>,
    pub items: Vec<ItemSummary>,
}

impl CatalogIndex {
    pub fn item(&self, id: ItemId) -> Option<&ItemSummary> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn items_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ItemSummary> + 'a {
        self.items.iter().filter(move |item| item.category == category)
    }
}

/// One recolor/variation of a catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color1: String,
    #[serde(default)]
    pub color2: String,
    pub hex: String,
    #[serde(default)]
    pub variated_hex: String,
    #[serde(default)]
    pub image: String,
}

impl Variant {
    /// Code sent to the order bot: the recolor-specific hex when there is one.
    pub fn order_hex(&self) -> &str {
        if self.variated_hex.is_empty() {
            &self.hex
        } else {
            &self.variated_hex
        }
    }

    /// Label shown in the UI; "NA" and empty names read as the default look.
    pub fn label(&self) -> &str {
        if self.name.is_empty() || self.name == "NA" {
            "Default"
        } else {
            &self.name
        }
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        [self.color1.as_str(), self.color2.as_str()]
            .into_iter()
            .filter(|c| !c.is_empty() && *c != "None")
    }
}

/// Full catalog item from a per-category detail file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub catalog: String,
    #[serde(default)]
    pub style1: String,
    #[serde(default)]
    pub style2: String,
    #[serde(default)]
    pub hha_concept1: String,
    #[serde(default)]
    pub hha_concept2: String,
    #[serde(default)]
    pub hha_set: String,
    #[serde(default)]
    pub hha_series: String,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub diy: bool,
}

impl CatalogItem {
    pub fn variant(&self, idx: usize) -> Option<&Variant> {
        self.variants.get(idx)
    }
}

/// Per-variant grid row, derived from a catalog item or an index summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedEntry {
    pub id: ItemId,
    pub variant_idx: usize,
    pub name: String,
    pub variant_label: String,
    pub category: String,
    pub hex: String,
    pub image: String,
    pub variant_count: usize,
    pub tags: Vec<String>,
    /// Lowercased, space-joined `tags`, used for substring search
    pub tag_string: String,
}

impl ExpandedEntry {
    pub fn key(&self) -> ItemRef {
        ItemRef::new(self.id, self.variant_idx)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// `(id, variantIdx)` reference used by the cart and wishlists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub id: ItemId,
    #[serde(default)]
    pub variant_idx: usize,
}

impl ItemRef {
    pub fn new(id: ItemId, variant_idx: usize) -> Self {
        Self { id, variant_idx }
    }
}

/// Cart lines carried over from stores that predate catalog ids are numbered
/// from here up. They keep their snapshot but resolve to no catalog item.
pub const UNLINKED_ID_BASE: ItemId = 0x8000_0000;

/// Cart line: the reference plus a snapshot taken when it was added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub id: ItemId,
    #[serde(default)]
    pub variant_idx: usize,
    pub name: String,
    #[serde(default)]
    pub variant_label: String,
    pub hex: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_qty")]
    pub qty: u32,
}

fn default_qty() -> u32 {
    1
}

impl CartEntry {
    pub fn key(&self) -> ItemRef {
        ItemRef::new(self.id, self.variant_idx)
    }

    pub fn from_entry(entry: &ExpandedEntry, qty: u32) -> Self {
        Self {
            id: entry.id,
            variant_idx: entry.variant_idx,
            name: entry.name.clone(),
            variant_label: entry.variant_label.clone(),
            hex: entry.hex.clone(),
            image: entry.image.clone(),
            qty,
        }
    }

    pub fn from_variant(item: &CatalogItem, variant_idx: usize, qty: u32) -> Option<Self> {
        let variant = item.variant(variant_idx)?;
        Some(Self {
            id: item.id,
            variant_idx,
            name: item.name.clone(),
            variant_label: variant.label().to_string(),
            hex: variant.order_hex().to_string(),
            image: variant.image.clone(),
            qty,
        })
    }
}

/// How the catalog grid pulls in further pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    #[default]
    Batch,
    Continuous,
}

pub const DEFAULT_PREFIX: &str = "!";

/// User preferences kept in the persistent store
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub prefix: String,
    pub load_mode: LoadMode,
    pub first_run_seen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            load_mode: LoadMode::Batch,
            first_run_seen: false,
        }
    }
}
