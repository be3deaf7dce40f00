//! Global Application State Store
//!
//! One `AppState` in a Leptos `reactive_stores::Store`. Components read
//! individual fields; only `dispatch` writes.

use std::collections::BTreeSet;

use acnhex_core::{
    Cart, CatalogItem, Category, Debounce, ExpandedEntry, ItemId, ItemRef, Persist, Settings, Wishlists,
    DEFAULT_LIST_ID,
};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::config::Config;

/// Which page is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Catalog,
    Detail(ItemId),
    Cart,
    Wishlist,
    Settings,
    Info,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}

/// Color filter scope chosen in the filter panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorScope {
    #[default]
    Any,
    Primary,
    Secondary,
}

/// Search and browse filters
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters {
    /// Query the grid is showing results for
    pub query: String,
    /// Text currently in the search input
    pub draft: String,
    pub tags: BTreeSet<String>,
    pub category: Option<String>,
    /// Show every variant of the selected category instead of one row per item
    pub expanded: bool,
    pub color_scope: ColorScope,
}

/// What fills the catalog grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridSource {
    Discover,
    Category(String),
    Search,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridState {
    /// Bumped whenever the grid context changes; stale load results carry an old one
    pub ticket: u64,
    pub entries: Vec<ExpandedEntry>,
    /// Matches in the current source (for discovery: undrawn entries left)
    pub total: usize,
    pub status: LoadStatus,
}

impl GridState {
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.entries.len())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailState {
    pub id: Option<ItemId>,
    pub item: Option<CatalogItem>,
    pub variant_idx: usize,
    pub qty: u32,
    pub status: LoadStatus,
}

impl DetailState {
    pub fn key(&self) -> Option<ItemRef> {
        self.id.map(|id| ItemRef::new(id, self.variant_idx))
    }
}

/// Confirmation-gated operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirm {
    ClearCart,
    ClearAllData,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    /// First-run welcome with prefix setup
    Welcome,
    Confirm(Confirm),
    /// Add-to-list picker for one item
    ListPicker(ItemRef),
    CreateList,
    /// Clipboard refused; show the command for manual selection
    ManualCopy(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub search_open: bool,
    pub filter_panel_open: bool,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub next_toast_id: u64,
    /// Wishlist tab being shown
    pub active_list: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            search_open: false,
            filter_panel_open: false,
            modal: None,
            toast: None,
            next_toast_id: 0,
            active_list: DEFAULT_LIST_ID.to_string(),
        }
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub route: Route,
    pub filters: Filters,
    pub grid: GridState,
    pub detail: DetailState,
    pub cart: Cart,
    pub wishlists: Wishlists,
    pub settings: Settings,
    pub ui: UiState,
    pub search_debounce: Debounce,
    /// Discovery indices already drawn this session
    pub random_drawn: BTreeSet<usize>,
    pub categories: Vec<Category>,
    pub tag_vocabulary: Vec<String>,
    pub index_status: LoadStatus,
    /// Bumped when newly loaded catalog data can change derived views
    pub catalog_version: u32,
}

impl AppState {
    /// Initial state from persisted data; the welcome modal shows on first run.
    pub fn load(persist: &Persist, config: &Config) -> Self {
        let settings = persist.load_settings();
        let ui = UiState {
            modal: (!settings.first_run_seen).then_some(Modal::Welcome),
            ..Default::default()
        };
        Self {
            cart: persist.load_cart(),
            wishlists: persist.load_wishlists(),
            settings,
            ui,
            search_debounce: Debounce::new(config.search_debounce_ms),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
