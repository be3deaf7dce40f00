//! Catalog Data Service
//!
//! Lazily loads the catalog index and per-category detail files from a
//! `CatalogSource`, caches them for the session, and derives the expanded
//! per-variant entries used by the grid, search and random discovery.
//!
//! Loads are deduplicated: while a resource is in flight every caller awaits
//! the same shared future. Failed loads are not cached, so a retry refetches.

pub mod expand;
pub mod palette;
pub mod query;
pub mod sample;

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use futures::future::{join_all, LocalBoxFuture, Shared};
use futures::FutureExt;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::LoadError;
use crate::models::{CatalogIndex, CatalogItem, ExpandedEntry, ItemId, ItemRef, ItemSummary};

pub use expand::{expand, expand_item, from_summary};
pub use query::{paginate, search, Page};

pub type LoadFuture<T> = LocalBoxFuture<'static, Result<T, LoadError>>;
type SharedLoad<T> = Shared<LoadFuture<T>>;

/// Where catalog files come from (HTTP in the browser, fixtures in tests)
pub trait CatalogSource {
    fn fetch_index(&self) -> LoadFuture<CatalogIndex>;
    fn fetch_category(&self, slug: &str) -> LoadFuture<Vec<CatalogItem>>;
}

/// URL-safe file slug for a category name ("Wall-mounted" -> "wall-mounted",
/// "Tops & Dresses" -> "tops-dresses").
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

pub struct Catalog {
    source: Rc<dyn CatalogSource>,
    index: RefCell<Option<Rc<CatalogIndex>>>,
    index_inflight: RefCell<Option<SharedLoad<Rc<CatalogIndex>>>>,
    categories: RefCell<HashMap<String, Rc<Vec<CatalogItem>>>>,
    inflight: RefCell<HashMap<String, SharedLoad<Rc<Vec<CatalogItem>>>>>,
    expanded: RefCell<HashMap<String, Rc<Vec<ExpandedEntry>>>>,
    everything: RefCell<Option<Rc<Vec<ExpandedEntry>>>>,
    rng: RefCell<SmallRng>,
}

impl Catalog {
    pub fn new(source: Rc<dyn CatalogSource>, seed: u64) -> Self {
        Self {
            source,
            index: RefCell::new(None),
            index_inflight: RefCell::new(None),
            categories: RefCell::new(HashMap::new()),
            inflight: RefCell::new(HashMap::new()),
            expanded: RefCell::new(HashMap::new()),
            everything: RefCell::new(None),
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
        }
    }

    // ========================
    // Async loads
    // ========================

    /// Fetch the index once per session.
    pub async fn load_index(&self) -> Result<Rc<CatalogIndex>, LoadError> {
        if let Some(index) = self.index() {
            return Ok(index);
        }
        let shared = self
            .index_inflight
            .borrow_mut()
            .get_or_insert_with(|| {
                log::debug!("[CATALOG] fetching index");
                self.source.fetch_index().map(|r| r.map(Rc::new)).boxed_local().shared()
            })
            .clone();

        let result = shared.clone().await;
        {
            let mut slot = self.index_inflight.borrow_mut();
            if slot.as_ref().is_some_and(|s| s.ptr_eq(&shared)) {
                *slot = None;
            }
        }
        match &result {
            Ok(index) => {
                if self.index.borrow().is_none() {
                    log::info!(
                        "[CATALOG] index loaded: {} items across {} categories",
                        index.items.len(),
                        index.categories.len()
                    );
                }
                *self.index.borrow_mut() = Some(index.clone());
            }
            Err(e) => log::warn!("[CATALOG] index load failed: {}", e),
        }
        result
    }

    /// Fetch one category's detail file on first need.
    pub async fn load_category(&self, key: &str) -> Result<Rc<Vec<CatalogItem>>, LoadError> {
        if let Some(items) = self.cached_category(key) {
            return Ok(items);
        }
        let index = self.load_index().await?;
        if index.category(key).is_none() {
            return Err(LoadError::UnknownCategory(key.to_string()));
        }

        let shared = self
            .inflight
            .borrow_mut()
            .entry(key.to_string())
            .or_insert_with(|| {
                let slug = slug(key);
                log::debug!("[CATALOG] fetching category {} ({})", key, slug);
                self.source.fetch_category(&slug).map(|r| r.map(Rc::new)).boxed_local().shared()
            })
            .clone();

        let result = shared.clone().await;
        {
            let mut inflight = self.inflight.borrow_mut();
            if inflight.get(key).is_some_and(|s| s.ptr_eq(&shared)) {
                inflight.remove(key);
            }
        }
        match &result {
            Ok(items) => self.store_category(key, items.clone()),
            Err(e) => log::warn!("[CATALOG] category {} failed: {}", key, e),
        }
        result
    }

    /// Every category, for global search and random discovery.
    pub async fn load_all(&self) -> Result<(), LoadError> {
        let index = self.load_index().await?;
        let keys: Vec<String> = index.categories.iter().map(|c| c.name.clone()).collect();
        let results = join_all(keys.iter().map(|key| self.load_category(key))).await;
        match results.into_iter().find_map(Result::err) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Full item for the detail page; `Ok(None)` when the id is unknown.
    pub async fn get_detail(&self, id: ItemId) -> Result<Option<CatalogItem>, LoadError> {
        let index = self.load_index().await?;
        let Some(summary) = index.item(id) else {
            return Ok(None);
        };
        let items = self.load_category(&summary.category).await?;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    fn store_category(&self, key: &str, items: Rc<Vec<CatalogItem>>) {
        if self.categories.borrow().contains_key(key) {
            return;
        }
        let entries = Rc::new(expand(&items));
        log::info!("[CATALOG] {}: {} items, {} variants", key, items.len(), entries.len());
        self.categories.borrow_mut().insert(key.to_string(), items);
        self.expanded.borrow_mut().insert(key.to_string(), entries);
        *self.everything.borrow_mut() = None;
    }

    // ========================
    // Cached lookups
    // ========================

    pub fn index(&self) -> Option<Rc<CatalogIndex>> {
        self.index.borrow().clone()
    }

    pub fn cached_category(&self, key: &str) -> Option<Rc<Vec<CatalogItem>>> {
        self.categories.borrow().get(key).cloned()
    }

    pub fn is_loaded(&self, key: &str) -> bool {
        self.categories.borrow().contains_key(key)
    }

    pub fn all_loaded(&self) -> bool {
        self.index()
            .is_some_and(|index| index.categories.iter().all(|c| self.is_loaded(&c.name)))
    }

    pub fn expanded(&self, key: &str) -> Option<Rc<Vec<ExpandedEntry>>> {
        self.expanded.borrow().get(key).cloned()
    }

    /// The whole expanded catalog in index category order, once every
    /// category is loaded.
    pub fn everything(&self) -> Option<Rc<Vec<ExpandedEntry>>> {
        if let Some(all) = self.everything.borrow().clone() {
            return Some(all);
        }
        if !self.all_loaded() {
            return None;
        }
        let index = self.index()?;
        let expanded = self.expanded.borrow();
        let all: Vec<ExpandedEntry> = index
            .categories
            .iter()
            .filter_map(|c| expanded.get(&c.name))
            .flat_map(|entries| entries.iter().cloned())
            .collect();
        let all = Rc::new(all);
        *self.everything.borrow_mut() = Some(all.clone());
        Some(all)
    }

    /// Unexpanded grid rows for one category, straight from the index.
    pub fn summaries(&self, key: &str) -> Option<Vec<ExpandedEntry>> {
        let index = self.index()?;
        Some(index.items_in(key).map(from_summary).collect())
    }

    /// Search pool: one category's variants, or the whole catalog.
    pub fn search_pool(&self, category: Option<&str>) -> Option<Rc<Vec<ExpandedEntry>>> {
        match category {
            Some(key) => self.expanded(key),
            None => self.everything(),
        }
    }

    pub fn index_item(&self, id: ItemId) -> Option<ItemSummary> {
        self.index()?.item(id).cloned()
    }

    pub fn detail_cached(&self, id: ItemId) -> Option<CatalogItem> {
        let categories = self.categories.borrow();
        match self.index_item(id) {
            Some(summary) => categories.get(&summary.category)?.iter().find(|i| i.id == id).cloned(),
            None => categories.values().flat_map(|items| items.iter()).find(|i| i.id == id).cloned(),
        }
    }

    /// Grid entry for a cart/wishlist reference. Falls back to the index
    /// summary for a primary variant whose category is not loaded yet.
    pub fn resolve(&self, item: ItemRef) -> Option<ExpandedEntry> {
        let summary = self.index_item(item.id);
        if let Some(key) = summary.as_ref().map(|s| s.category.clone()) {
            if let Some(entries) = self.expanded(&key) {
                return entries.iter().find(|e| e.key() == item).cloned();
            }
        }
        summary.filter(|_| item.variant_idx == 0).map(|s| from_summary(&s))
    }

    /// Categories still needed to resolve `refs` at variant precision.
    pub fn missing_categories(&self, refs: impl IntoIterator<Item = ItemRef>) -> Vec<String> {
        let mut missing = BTreeSet::new();
        for item in refs {
            if let Some(summary) = self.index_item(item.id) {
                if !self.is_loaded(&summary.category) {
                    missing.insert(summary.category);
                }
            }
        }
        missing.into_iter().collect()
    }

    /// Sorted non-color item tags seen in the index, for the filter panel.
    pub fn tag_vocabulary(&self) -> Vec<String> {
        let Some(index) = self.index() else {
            return Vec::new();
        };
        let tags: BTreeSet<String> = index
            .items
            .iter()
            .flat_map(|item| item.tags.iter())
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && !palette::is_color(t))
            .collect();
        tags.into_iter().collect()
    }

    /// Draw `count` unseen entries from the whole catalog. `exclude` carries
    /// the indices already shown this session.
    pub fn random_sample(&self, count: usize, exclude: &mut BTreeSet<usize>) -> Vec<ExpandedEntry> {
        let Some(all) = self.everything() else {
            return Vec::new();
        };
        let picks = sample::sample_indices(all.len(), count, exclude, &mut *self.rng.borrow_mut());
        picks.into_iter().map(|i| all[i].clone()).collect()
    }
}
