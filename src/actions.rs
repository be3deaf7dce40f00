//! Actions and Reducer
//!
//! Every user interaction and every async completion becomes an `Action`.
//! `update` mutates the state, writes durable changes through the persistent
//! store, and returns how to render plus the side effects to run next.

use acnhex_core::catalog::{paginate, search};
use acnhex_core::{
    generate_command, Cart, CartAdd, CartEntry, Catalog, CatalogItem, ExpandedEntry, ItemId, ItemRef, ListAdd,
    normalize_prefix, LoadError, LoadMode, Persist, Settings, StoreError, Ticket, Wishlists, CART_CAPACITY,
    DEFAULT_LIST_ID,
};

use crate::config::Config;
use crate::render::{Patch, Render};
use crate::store::{AppState, ColorScope, Confirm, DetailState, Filters, GridSource, GridState, LoadStatus, Modal, Route, Toast};

#[derive(Clone, Debug)]
pub enum Action {
    /// App mounted
    Start,
    IndexLoaded(Result<(), LoadError>),
    RetryIndex,
    Navigate(Route),
    /// Open the detail page on a specific variant
    OpenItem(ItemRef),

    // Catalog grid
    SelectCategory(Option<String>),
    SetExpanded(bool),
    LoadMore,
    RetryGrid,
    PoolLoaded { ticket: u64, result: Result<(), LoadError> },

    // Search overlay
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSettle(Ticket),
    SubmitSearch,
    ClearSearch,
    ToggleFilterPanel,
    SetColorScope(ColorScope),
    ToggleTag(String),
    ClearTags,

    // Detail page
    DetailLoaded { id: ItemId, result: Result<Option<CatalogItem>, LoadError> },
    RetryDetail,
    SelectVariant(usize),
    StepDetailQty(i32),
    AddDetailToCart,
    ToggleLoved(ItemRef),

    // Grid card shortcuts
    QuickAdd(ItemRef),
    QuickHeart(ItemRef),

    // Cart
    CartIncrement(ItemRef),
    CartDecrement(ItemRef),
    CartRemove(ItemRef),
    CopyCommand,
    CopyFinished { command: String, copied: bool },

    // Wishlists
    SelectList(String),
    OpenListPicker(ItemRef),
    AddToList { list_id: String, item: ItemRef },
    CreateList { name: String, cap: Option<usize> },
    RenameList { list_id: String, name: String },
    DeleteList(String),
    RemoveFromList { list_id: String, index: usize },
    AddListToCart(String),
    CategoriesLoaded(Result<(), LoadError>),

    // Settings
    SetPrefix(String),
    SetLoadMode(LoadMode),
    FinishWelcome { prefix: String },

    // Overlays
    OpenModal(Modal),
    CloseModal,
    ConfirmModal,
    DismissToast(u64),
}

/// Which catalog data a grid load waits for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pool {
    Category(String),
    All,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadIndex,
    LoadPool { ticket: u64, pool: Pool },
    LoadDetail(ItemId),
    LoadCategories(Vec<String>),
    Debounce(Ticket),
    DismissToast { id: u64, after_ms: u32 },
    CopyToClipboard(String),
}

#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub render: Render,
    pub effects: Vec<Effect>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn full() -> Self {
        Self { render: Render::Full, effects: Vec::new() }
    }

    pub fn patch(patch: Patch) -> Self {
        Self { render: Render::patch(patch), effects: Vec::new() }
    }

    pub fn and(mut self, other: Outcome) -> Self {
        self.render = self.render.and(other.render);
        self.effects.extend(other.effects);
        self
    }

    pub fn with(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Services the reducer reads and writes through
pub struct Ctx<'a> {
    pub catalog: &'a Catalog,
    pub persist: &'a Persist,
    pub config: &'a Config,
    /// Milliseconds, from `Date.now()` in the browser
    pub now: f64,
}

pub fn update(state: &mut AppState, action: Action, ctx: &Ctx) -> Outcome {
    match action {
        Action::Start | Action::RetryIndex => {
            state.index_status = LoadStatus::Loading;
            state.grid.status = LoadStatus::Loading;
            Outcome::full().with([Effect::LoadIndex])
        }
        Action::IndexLoaded(result) => index_loaded(state, result, ctx),
        Action::Navigate(route) => navigate(state, route, ctx),
        Action::OpenItem(item) => open_detail(state, item, ctx),

        Action::SelectCategory(category) => {
            if state.filters.category == category {
                return Outcome::none();
            }
            state.filters.category = category;
            state.filters.expanded = false;
            Outcome::full().with(reset_grid(state, ctx))
        }
        Action::SetExpanded(expanded) => {
            if state.filters.expanded == expanded {
                return Outcome::none();
            }
            state.filters.expanded = expanded;
            Outcome::full().with(reset_grid(state, ctx))
        }
        Action::LoadMore => {
            if state.grid.status.is_loading() || state.grid.remaining() == 0 {
                return Outcome::none();
            }
            Outcome::patch(Patch::Grid).with(next_page(state, ctx))
        }
        Action::RetryGrid => {
            if state.index_status != LoadStatus::Ready {
                state.index_status = LoadStatus::Loading;
                state.grid.status = LoadStatus::Loading;
                return Outcome::full().with([Effect::LoadIndex]);
            }
            Outcome::patch(Patch::Grid).with(next_page(state, ctx))
        }
        Action::PoolLoaded { ticket, result } => {
            if ticket != state.grid.ticket {
                log::debug!("[GRID] ignoring stale load (ticket {} != {})", ticket, state.grid.ticket);
                return Outcome::none();
            }
            match result {
                Ok(()) => Outcome::patch(Patch::Grid).with(next_page(state, ctx)),
                Err(e) => {
                    state.grid.status = LoadStatus::Failed(e.user_message().to_string());
                    Outcome::patch(Patch::Grid)
                }
            }
        }

        Action::OpenSearch => {
            state.ui.search_open = true;
            Outcome::patch(Patch::FilterPanel)
        }
        Action::CloseSearch => {
            state.ui.search_open = false;
            state.ui.filter_panel_open = false;
            state.search_debounce.cancel();
            let was_searching = grid_source(&state.filters) == GridSource::Search;
            state.filters.query.clear();
            state.filters.draft.clear();
            state.filters.tags.clear();
            if was_searching {
                Outcome::full().with(reset_grid(state, ctx))
            } else {
                Outcome::patch(Patch::FilterPanel)
            }
        }
        Action::SearchInput(text) => {
            state.filters.draft = text;
            let ticket = state.search_debounce.poke(ctx.now);
            Outcome::patch(Patch::SearchDraft).with([Effect::Debounce(ticket)])
        }
        Action::SearchSettle(ticket) => {
            if !state.search_debounce.settle(ticket, ctx.now) {
                return Outcome::none();
            }
            commit_query(state, ctx)
        }
        Action::SubmitSearch => {
            state.search_debounce.cancel();
            commit_query(state, ctx)
        }
        Action::ClearSearch => {
            state.search_debounce.cancel();
            state.filters.draft.clear();
            commit_query(state, ctx)
        }
        Action::ToggleFilterPanel => {
            state.ui.filter_panel_open = !state.ui.filter_panel_open;
            Outcome::patch(Patch::FilterPanel)
        }
        Action::SetColorScope(scope) => {
            state.filters.color_scope = scope;
            Outcome::patch(Patch::FilterPanel)
        }
        Action::ToggleTag(tag) => {
            if !state.filters.tags.remove(&tag) {
                state.filters.tags.insert(tag);
            }
            Outcome::patch(Patch::FilterPanel)
                .and(Outcome::patch(Patch::SearchResults))
                .with(reset_grid(state, ctx))
        }
        Action::ClearTags => {
            if state.filters.tags.is_empty() {
                return Outcome::none();
            }
            state.filters.tags.clear();
            Outcome::patch(Patch::FilterPanel)
                .and(Outcome::patch(Patch::SearchResults))
                .with(reset_grid(state, ctx))
        }

        Action::DetailLoaded { id, result } => detail_loaded(state, id, result, ctx),
        Action::RetryDetail => match state.detail.id {
            Some(id) if state.route == Route::Detail(id) => {
                state.detail.status = LoadStatus::Loading;
                Outcome::patch(Patch::DetailVariant).with([Effect::LoadDetail(id)])
            }
            _ => Outcome::none(),
        },
        Action::SelectVariant(idx) => {
            let valid = state.detail.item.as_ref().is_some_and(|item| idx < item.variants.len());
            if !valid || state.detail.variant_idx == idx {
                return Outcome::none();
            }
            state.detail.variant_idx = idx;
            Outcome::patch(Patch::DetailVariant)
        }
        Action::StepDetailQty(delta) => step_detail_qty(state, delta, ctx),
        Action::AddDetailToCart => add_detail_to_cart(state, ctx),
        Action::ToggleLoved(item) => {
            let loved = state.wishlists.toggle(item);
            let message = if loved { "Added to Loved Items" } else { "Removed from Loved Items" };
            Outcome::patch(Patch::Hearts)
                .and(notify(state, message, ctx))
                .and(save_wishlists(state, ctx))
        }

        Action::QuickAdd(item) => {
            let Some(entry) = ctx.catalog.resolve(item) else {
                return notify(state, "That item is no longer available", ctx);
            };
            match state.cart.add(CartEntry::from_entry(&entry, 1), 1) {
                CartAdd::Added { .. } => {
                    let message = format!("Added {} to your bag", display_name(&entry.name, &entry.variant_label));
                    Outcome::patch(Patch::CartBadge)
                        .and(notify(state, message, ctx))
                        .and(save_cart(state, ctx))
                }
                CartAdd::Refused { .. } => {
                    let message = capacity_message(&state.cart);
                    notify(state, message, ctx)
                }
            }
        }
        Action::QuickHeart(item) => {
            let message = if state.wishlists.in_any_list(item) {
                state.wishlists.remove_from_all_lists(item);
                "Removed from your wishlists"
            } else {
                state.wishlists.toggle(item);
                "Added to Loved Items"
            };
            Outcome::patch(Patch::Hearts)
                .and(notify(state, message, ctx))
                .and(save_wishlists(state, ctx))
        }

        Action::CartIncrement(item) => match state.cart.increment(item) {
            CartAdd::Added { .. } => Outcome::patch(Patch::CartLine).and(save_cart(state, ctx)),
            CartAdd::Refused { .. } => {
                let message = capacity_message(&state.cart);
                notify(state, message, ctx)
            }
        },
        Action::CartDecrement(item) => match state.cart.decrement(item) {
            Some(0) => Outcome::full().and(save_cart(state, ctx)),
            Some(_) => Outcome::patch(Patch::CartLine).and(save_cart(state, ctx)),
            None => Outcome::none(),
        },
        Action::CartRemove(item) => {
            if !state.cart.remove(item) {
                return Outcome::none();
            }
            Outcome::full().and(save_cart(state, ctx))
        }
        Action::CopyCommand => {
            if state.cart.is_empty() {
                return notify(state, "Your bag is empty", ctx);
            }
            let command = generate_command(&state.settings.prefix, state.cart.entries());
            Outcome::none().with([Effect::CopyToClipboard(command)])
        }
        Action::CopyFinished { command, copied } => {
            if copied {
                notify(state, "Command copied!", ctx)
            } else {
                state.ui.modal = Some(Modal::ManualCopy(command));
                Outcome::patch(Patch::Modal)
            }
        }

        Action::SelectList(list_id) => {
            if state.wishlists.list(&list_id).is_none() || state.ui.active_list == list_id {
                return Outcome::none();
            }
            state.ui.active_list = list_id;
            Outcome::full()
        }
        Action::OpenListPicker(item) => {
            state.ui.modal = Some(Modal::ListPicker(item));
            Outcome::patch(Patch::Modal)
        }
        Action::AddToList { list_id, item } => add_to_list(state, &list_id, item, ctx),
        Action::CreateList { name, cap } => {
            let Some(list_id) = state.wishlists.create_list(&name, cap) else {
                return notify(state, "Give the list a name first", ctx);
            };
            state.ui.active_list = list_id;
            state.ui.modal = None;
            let message = format!("Created \"{}\"", name.trim());
            Outcome::full()
                .and(notify(state, message, ctx))
                .and(save_wishlists(state, ctx))
        }
        Action::RenameList { list_id, name } => {
            if !state.wishlists.rename_list(&list_id, &name) {
                return Outcome::none();
            }
            Outcome::full().and(save_wishlists(state, ctx))
        }
        Action::DeleteList(list_id) => {
            if !state.wishlists.delete_list(&list_id) {
                return notify(state, "Loved Items can't be deleted", ctx);
            }
            if state.ui.active_list == list_id {
                state.ui.active_list = DEFAULT_LIST_ID.to_string();
            }
            Outcome::full()
                .and(notify(state, "List deleted", ctx))
                .and(save_wishlists(state, ctx))
        }
        Action::RemoveFromList { list_id, index } => {
            if state.wishlists.remove_at(&list_id, index).is_none() {
                return Outcome::none();
            }
            Outcome::full().and(save_wishlists(state, ctx))
        }
        Action::AddListToCart(list_id) => add_list_to_cart(state, &list_id, ctx),
        Action::CategoriesLoaded(result) => {
            state.catalog_version += 1;
            match result {
                Ok(()) => Outcome::full(),
                Err(e) => Outcome::full().and(notify(state, e.user_message(), ctx)),
            }
        }

        Action::SetPrefix(prefix) => {
            let prefix = normalize_prefix(&prefix);
            if prefix == state.settings.prefix {
                return Outcome::none();
            }
            let saved = ctx.persist.save_prefix(&prefix);
            state.settings.prefix = prefix;
            Outcome::full()
                .and(notify(state, "Prefix saved", ctx))
                .and(report_save(state, saved, "your prefix", ctx))
        }
        Action::SetLoadMode(mode) => {
            if state.settings.load_mode == mode {
                return Outcome::none();
            }
            let saved = ctx.persist.save_load_mode(mode);
            state.settings.load_mode = mode;
            Outcome::full().and(report_save(state, saved, "the loading mode", ctx))
        }
        Action::FinishWelcome { prefix } => {
            let mut out = Outcome::full();
            if !prefix.trim().is_empty() {
                let prefix = normalize_prefix(&prefix);
                let saved = ctx.persist.save_prefix(&prefix);
                state.settings.prefix = prefix;
                out = out.and(report_save(state, saved, "your prefix", ctx));
            }
            state.ui.modal = None;
            out.and(mark_first_run_seen(state, ctx))
        }

        Action::OpenModal(modal) => {
            state.ui.modal = Some(modal);
            Outcome::patch(Patch::Modal)
        }
        Action::CloseModal => {
            let welcome = state.ui.modal == Some(Modal::Welcome);
            state.ui.modal = None;
            let out = Outcome::patch(Patch::Modal);
            if welcome {
                out.and(mark_first_run_seen(state, ctx))
            } else {
                out
            }
        }
        Action::ConfirmModal => confirm(state, ctx),
        Action::DismissToast(id) => match &state.ui.toast {
            Some(toast) if toast.id == id => {
                state.ui.toast = None;
                Outcome::patch(Patch::Toast)
            }
            _ => Outcome::none(),
        },
    }
}

// ========================
// Catalog grid
// ========================

pub fn grid_source(filters: &Filters) -> GridSource {
    if !filters.query.trim().is_empty() || !filters.tags.is_empty() {
        GridSource::Search
    } else {
        match &filters.category {
            Some(key) => GridSource::Category(key.clone()),
            None => GridSource::Discover,
        }
    }
}

/// Start the grid over for a new context; in-flight loads for the old one
/// become stale.
fn reset_grid(state: &mut AppState, ctx: &Ctx) -> Vec<Effect> {
    state.grid = GridState { ticket: state.grid.ticket + 1, ..GridState::default() };
    if grid_source(&state.filters) == GridSource::Discover {
        if let Some(all) = ctx.catalog.everything() {
            if state.random_drawn.len() >= all.len() {
                state.random_drawn.clear();
            }
        }
    }
    next_page(state, ctx)
}

fn waiting_for(state: &mut AppState, pool: Pool) -> Vec<Effect> {
    state.grid.status = LoadStatus::Loading;
    vec![Effect::LoadPool { ticket: state.grid.ticket, pool }]
}

fn take_page(grid: &mut GridState, pool: &[ExpandedEntry], limit: usize) {
    let page = paginate(pool, grid.entries.len(), limit);
    grid.entries.extend(page.items.iter().cloned());
    grid.total = page.total;
    grid.status = LoadStatus::Ready;
}

/// Append the next batch of the current source, or ask for the data it needs.
fn next_page(state: &mut AppState, ctx: &Ctx) -> Vec<Effect> {
    if ctx.catalog.index().is_none() {
        state.grid.status = match &state.index_status {
            LoadStatus::Failed(message) => LoadStatus::Failed(message.clone()),
            _ => LoadStatus::Loading,
        };
        return Vec::new();
    }
    let limit = ctx.config.page_size;

    match grid_source(&state.filters) {
        GridSource::Discover => {
            let Some(all) = ctx.catalog.everything() else {
                return waiting_for(state, Pool::All);
            };
            let batch = ctx.catalog.random_sample(limit, &mut state.random_drawn);
            state.grid.entries.extend(batch);
            let undrawn = all.len().saturating_sub(state.random_drawn.len());
            state.grid.total = state.grid.entries.len() + undrawn;
            state.grid.status = LoadStatus::Ready;
        }
        GridSource::Category(key) => {
            if state.filters.expanded {
                let Some(pool) = ctx.catalog.expanded(&key) else {
                    return waiting_for(state, Pool::Category(key));
                };
                take_page(&mut state.grid, &pool, limit);
            } else {
                let pool = ctx.catalog.summaries(&key).unwrap_or_default();
                take_page(&mut state.grid, &pool, limit);
            }
        }
        GridSource::Search => {
            let category = state.filters.category.clone();
            let Some(pool) = ctx.catalog.search_pool(category.as_deref()) else {
                return waiting_for(state, category.map_or(Pool::All, Pool::Category));
            };
            let offset = state.grid.entries.len();
            let (hits, total) = search(&pool, &state.filters.query, &state.filters.tags, offset, limit);
            state.grid.entries.extend(hits);
            state.grid.total = total;
            state.grid.status = LoadStatus::Ready;
        }
    }
    Vec::new()
}

fn commit_query(state: &mut AppState, ctx: &Ctx) -> Outcome {
    let query = state.filters.draft.trim().to_string();
    if query == state.filters.query {
        return Outcome::patch(Patch::SearchDraft);
    }
    state.filters.query = query;
    Outcome::patch(Patch::SearchResults).with(reset_grid(state, ctx))
}

fn index_loaded(state: &mut AppState, result: Result<(), LoadError>, ctx: &Ctx) -> Outcome {
    match result {
        Ok(()) => {
            state.index_status = LoadStatus::Ready;
            if let Some(index) = ctx.catalog.index() {
                state.categories = index.categories.clone();
            }
            state.tag_vocabulary = ctx.catalog.tag_vocabulary();
            state.catalog_version += 1;
            let mut effects = reset_grid(state, ctx);
            if state.route == Route::Wishlist {
                effects.extend(resolve_wishlists(state, ctx));
            }
            Outcome::full().with(effects)
        }
        Err(e) => {
            log::error!("[APP] catalog index unavailable: {}", e);
            state.index_status = LoadStatus::Failed(e.user_message().to_string());
            state.grid.status = state.index_status.clone();
            Outcome::full()
        }
    }
}

// ========================
// Navigation & detail
// ========================

fn navigate(state: &mut AppState, route: Route, ctx: &Ctx) -> Outcome {
    if let Route::Detail(id) = route {
        return open_detail(state, ItemRef::new(id, 0), ctx);
    }
    state.route = route;
    state.ui.search_open = false;
    state.ui.filter_panel_open = false;
    let effects = if route == Route::Wishlist { resolve_wishlists(state, ctx) } else { Vec::new() };
    Outcome::full().with(effects)
}

/// Wishlist refs to non-primary variants need their category loaded.
fn resolve_wishlists(state: &AppState, ctx: &Ctx) -> Vec<Effect> {
    let refs = state.wishlists.lists().iter().flat_map(|l| l.items.iter().copied());
    let missing = ctx.catalog.missing_categories(refs.filter(|r| r.variant_idx > 0));
    if missing.is_empty() {
        Vec::new()
    } else {
        vec![Effect::LoadCategories(missing)]
    }
}

fn open_detail(state: &mut AppState, item: ItemRef, ctx: &Ctx) -> Outcome {
    state.route = Route::Detail(item.id);
    state.ui.search_open = false;
    state.ui.filter_panel_open = false;

    let cached = ctx.catalog.detail_cached(item.id);
    let loaded = cached.is_some();
    let variant_idx = cached
        .as_ref()
        .map_or(item.variant_idx, |c| item.variant_idx.min(c.variants.len().saturating_sub(1)));
    state.detail = DetailState {
        id: Some(item.id),
        item: cached,
        variant_idx,
        qty: 1,
        status: if loaded { LoadStatus::Ready } else { LoadStatus::Loading },
    };
    let effects = if loaded { Vec::new() } else { vec![Effect::LoadDetail(item.id)] };
    Outcome::full().with(effects)
}

fn detail_loaded(
    state: &mut AppState,
    id: ItemId,
    result: Result<Option<CatalogItem>, LoadError>,
    ctx: &Ctx,
) -> Outcome {
    if state.route != Route::Detail(id) || state.detail.id != Some(id) {
        log::debug!("[DETAIL] item {} arrived after navigating away", id);
        return Outcome::none();
    }
    match result {
        Ok(Some(item)) => {
            state.detail.variant_idx = state.detail.variant_idx.min(item.variants.len().saturating_sub(1));
            state.detail.item = Some(item);
            state.detail.status = LoadStatus::Ready;
            Outcome::full()
        }
        Ok(None) => {
            log::warn!("[DETAIL] item {} not in catalog", id);
            state.route = Route::Catalog;
            state.detail = DetailState::default();
            Outcome::full().and(notify(state, "That item is no longer available", ctx))
        }
        Err(e) => {
            state.detail.status = LoadStatus::Failed(e.user_message().to_string());
            Outcome::full()
        }
    }
}

fn step_detail_qty(state: &mut AppState, delta: i32, ctx: &Ctx) -> Outcome {
    let current = state.detail.qty.max(1);
    let wanted = (i64::from(current) + i64::from(delta)).max(1) as u32;
    let ceiling = state.cart.available().max(1);
    if wanted > ceiling {
        let message = capacity_message(&state.cart);
        return notify(state, message, ctx);
    }
    if wanted == current {
        return Outcome::none();
    }
    state.detail.qty = wanted;
    Outcome::patch(Patch::DetailQuantity)
}

fn add_detail_to_cart(state: &mut AppState, ctx: &Ctx) -> Outcome {
    let Some(item) = state.detail.item.as_ref() else {
        return Outcome::none();
    };
    let qty = state.detail.qty.max(1);
    let Some(snapshot) = CartEntry::from_variant(item, state.detail.variant_idx, qty) else {
        return Outcome::none();
    };
    let name = display_name(&snapshot.name, &snapshot.variant_label);

    match state.cart.add(snapshot, qty) {
        CartAdd::Added { .. } => {
            state.detail.qty = 1;
            let message = if qty == 1 { format!("Added {} to your bag", name) } else { format!("Added {} × {} to your bag", qty, name) };
            Outcome::patch(Patch::CartBadge)
                .and(Outcome::patch(Patch::DetailQuantity))
                .and(notify(state, message, ctx))
                .and(save_cart(state, ctx))
        }
        CartAdd::Refused { .. } => {
            let message = capacity_message(&state.cart);
            notify(state, message, ctx)
        }
    }
}

// ========================
// Wishlists
// ========================

fn add_to_list(state: &mut AppState, list_id: &str, item: ItemRef, ctx: &Ctx) -> Outcome {
    let name = state.wishlists.list(list_id).map(|l| l.name.clone()).unwrap_or_default();
    let result = state.wishlists.add_to_list(list_id, item);
    let message = match result {
        ListAdd::Added => format!("Added to {}", name),
        ListAdd::Removed => format!("Removed from {}", name),
        ListAdd::Full => format!("{} is full", name),
        ListAdd::NoSuchList => "That list no longer exists".to_string(),
    };
    state.ui.modal = None;
    let out = Outcome::patch(Patch::Hearts)
        .and(Outcome::patch(Patch::Modal))
        .and(notify(state, message, ctx));
    if matches!(result, ListAdd::Added | ListAdd::Removed) {
        out.and(save_wishlists(state, ctx))
    } else {
        out
    }
}

/// Add one of each list entry, as many as fit.
fn add_list_to_cart(state: &mut AppState, list_id: &str, ctx: &Ctx) -> Outcome {
    let Some(list) = state.wishlists.list(list_id) else {
        return Outcome::none();
    };
    let refs = list.items.clone();
    if refs.is_empty() {
        return notify(state, "This list is empty", ctx);
    }

    let mut added = 0;
    let mut skipped = 0;
    for item in refs {
        let fitted = ctx
            .catalog
            .resolve(item)
            .is_some_and(|entry| state.cart.add(CartEntry::from_entry(&entry, 1), 1).is_added());
        if fitted {
            added += 1;
        } else {
            skipped += 1;
        }
    }
    let message = match (added, skipped) {
        (0, _) => capacity_message(&state.cart),
        (n, 0) => format!("Added {} {} to your bag", n, plural(n, "item")),
        (n, s) => format!("Added {} {} to your bag; {} didn't fit", n, plural(n, "item"), s),
    };
    let out = Outcome::patch(Patch::CartBadge).and(notify(state, message, ctx));
    if added > 0 {
        out.and(save_cart(state, ctx))
    } else {
        out
    }
}

// ========================
// Modals
// ========================

fn confirm(state: &mut AppState, ctx: &Ctx) -> Outcome {
    let Some(Modal::Confirm(kind)) = state.ui.modal.clone() else {
        return Outcome::none();
    };
    state.ui.modal = None;
    match kind {
        Confirm::ClearCart => {
            state.cart.clear();
            Outcome::full()
                .and(notify(state, "Bag cleared", ctx))
                .and(save_cart(state, ctx))
        }
        Confirm::ClearAllData => {
            ctx.persist.clear_all();
            log::info!("[APP] cleared all saved data");
            state.cart = Cart::new();
            state.wishlists = Wishlists::new();
            state.settings = Settings::default();
            state.ui.active_list = DEFAULT_LIST_ID.to_string();
            state.ui.modal = Some(Modal::Welcome);
            Outcome::full()
        }
    }
}

// ========================
// Helpers
// ========================

fn notify(state: &mut AppState, message: impl Into<String>, ctx: &Ctx) -> Outcome {
    state.ui.next_toast_id += 1;
    let id = state.ui.next_toast_id;
    state.ui.toast = Some(Toast { id, message: message.into() });
    Outcome::patch(Patch::Toast).with([Effect::DismissToast { id, after_ms: ctx.config.toast_ms }])
}

/// The change stays on screen either way. A failed write replaces the
/// current toast, so chain this after any success notice.
fn report_save(state: &mut AppState, saved: Result<(), StoreError>, what: &str, ctx: &Ctx) -> Outcome {
    match saved {
        Ok(()) => Outcome::none(),
        Err(e) => {
            log::warn!("[APP] could not save {}: {}", what, e);
            notify(state, format!("Couldn't save {}; it will be lost on reload", what), ctx)
        }
    }
}

fn save_cart(state: &mut AppState, ctx: &Ctx) -> Outcome {
    let saved = ctx.persist.save_cart(&state.cart);
    report_save(state, saved, "your bag", ctx)
}

fn save_wishlists(state: &mut AppState, ctx: &Ctx) -> Outcome {
    let saved = ctx.persist.save_wishlists(&state.wishlists);
    report_save(state, saved, "your wishlists", ctx)
}

fn mark_first_run_seen(state: &mut AppState, ctx: &Ctx) -> Outcome {
    state.settings.first_run_seen = true;
    let saved = ctx.persist.save_first_run_seen();
    report_save(state, saved, "the welcome setting", ctx)
}

fn capacity_message(cart: &Cart) -> String {
    match cart.available() {
        0 => format!("Your bag is full ({} / {})", CART_CAPACITY, CART_CAPACITY),
        n => format!("Only {} more {} will fit in your bag", n, plural(n as usize, "item")),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

pub fn display_name(name: &str, variant_label: &str) -> String {
    if variant_label.is_empty() || variant_label == "Default" {
        name.to_string()
    } else {
        format!("{} ({})", name, variant_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;
    use acnhex_core::storage::KEY_CART;
    use acnhex_core::KeyValueStore;

    struct Harness {
        catalog: Catalog,
        persist: Persist,
        config: Config,
        state: AppState,
    }

    impl Harness {
        fn new(catalog: Catalog) -> Self {
            Self::with_persist(catalog, Persist::in_memory())
        }

        fn with_persist(catalog: Catalog, persist: Persist) -> Self {
            let config = Config { page_size: 20, ..Config::default() };
            let mut state = AppState::load(&persist, &config);
            state.index_status = LoadStatus::Ready;
            Self { catalog, persist, config, state }
        }

        fn run_at(&mut self, action: Action, now: f64) -> Outcome {
            let ctx = Ctx { catalog: &self.catalog, persist: &self.persist, config: &self.config, now };
            update(&mut self.state, action, &ctx)
        }

        fn run(&mut self, action: Action) -> Outcome {
            self.run_at(action, 0.0)
        }
    }

    /// Backend that refuses every write, like a full `localStorage`.
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend { key: key.to_string(), message: "quota exceeded".to_string() })
        }

        fn remove(&self, _key: &str) {}
    }

    fn toast(h: &Harness) -> Option<&str> {
        h.state.ui.toast.as_ref().map(|t| t.message.as_str())
    }

    fn patches(outcome: &Outcome) -> Vec<Patch> {
        match &outcome.render {
            Render::Patch(p) => p.clone(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_search_burst_settles_once() {
        let mut h = Harness::new(fixture::loaded_catalog());
        let mut tickets = Vec::new();
        for (i, text) in ["c", "ch", "chair"].iter().enumerate() {
            let out = h.run_at(Action::SearchInput(text.to_string()), i as f64 * 100.0);
            assert_eq!(patches(&out), vec![Patch::SearchDraft]);
            if let [Effect::Debounce(t)] = out.effects.as_slice() {
                tickets.push(*t);
            }
        }
        assert_eq!(tickets.len(), 3);
        assert_eq!(h.state.filters.query, "");

        // superseded tickets do nothing
        assert_eq!(h.run_at(Action::SearchSettle(tickets[0]), 1000.0), Outcome::none());
        assert_eq!(h.run_at(Action::SearchSettle(tickets[1]), 1000.0), Outcome::none());

        let out = h.run_at(Action::SearchSettle(tickets[2]), 500.0);
        assert_eq!(patches(&out), vec![Patch::SearchResults]);
        assert_eq!(h.state.filters.query, "chair");
        assert_eq!(h.state.grid.entries.len(), 1);
        assert_eq!(h.state.grid.entries[0].name, "Blue Chair");

        // settles only once
        assert_eq!(h.run_at(Action::SearchSettle(tickets[2]), 600.0), Outcome::none());
    }

    #[test]
    fn test_blue_chair_search_with_color_filter() {
        let mut h = Harness::new(fixture::loaded_catalog());
        h.run(Action::ToggleTag("blue".to_string()));
        // blue variants of chair and sofa
        assert_eq!(h.state.grid.total, 2);

        h.run(Action::SearchInput("chair".to_string()));
        h.run(Action::SubmitSearch);
        assert_eq!(h.state.grid.total, 1);
        assert_eq!(h.state.grid.entries[0].hex, "0A3F");

        h.run(Action::ToggleTag("primary:red".to_string()));
        assert_eq!(h.state.grid.total, 0);
    }

    #[test]
    fn test_stale_pool_result_is_ignored() {
        let mut h = Harness::new(fixture::catalog());
        let out = h.run(Action::SearchInput("sofa".to_string()));
        assert_eq!(out.effects.len(), 1);
        let out = h.run(Action::SubmitSearch);
        let Some(Effect::LoadPool { ticket: old, pool }) = out.effects.first().cloned() else {
            panic!("search before load_all should wait for the pool");
        };
        assert_eq!(pool, Pool::All);
        assert!(h.state.grid.status.is_loading());

        // context changes before the load lands
        h.run(Action::ClearSearch);
        assert_ne!(h.state.grid.ticket, old);
        let before = h.state.grid.clone();
        let out = h.run(Action::PoolLoaded { ticket: old, result: Ok(()) });
        assert_eq!(out, Outcome::none());
        assert_eq!(h.state.grid, before);
    }

    #[test]
    fn test_pool_failure_shows_retryable_error() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::SelectCategory(Some("Housewares".to_string())));
        let out = h.run(Action::SetExpanded(true));
        let ticket = h.state.grid.ticket;
        assert_eq!(out.effects, vec![Effect::LoadPool { ticket, pool: Pool::Category("Housewares".to_string()) }]);

        let err = LoadError::Status { url: "x".to_string(), status: 500 };
        h.run(Action::PoolLoaded { ticket, result: Err(err) });
        assert!(matches!(h.state.grid.status, LoadStatus::Failed(_)));
    }

    #[test]
    fn test_category_paging_appends_batches() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::SelectCategory(Some("Miscellaneous".to_string())));
        assert_eq!(h.state.grid.entries.len(), 20);
        assert_eq!(h.state.grid.total, 61);

        let out = h.run(Action::LoadMore);
        assert_eq!(patches(&out), vec![Patch::Grid]);
        h.run(Action::LoadMore);
        h.run(Action::LoadMore);
        assert_eq!(h.state.grid.entries.len(), 61);
        assert_eq!(h.state.grid.remaining(), 0);
        assert_eq!(h.run(Action::LoadMore), Outcome::none());
    }

    #[test]
    fn test_discovery_pages_never_repeat() {
        let mut h = Harness::new(fixture::loaded_catalog());
        h.run(Action::RetryGrid);
        assert_eq!(h.state.grid.entries.len(), 20);
        while h.state.grid.remaining() > 0 {
            h.run(Action::LoadMore);
        }
        let mut seen: Vec<ItemRef> = h.state.grid.entries.iter().map(|e| e.key()).collect();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
        // 1 chair + 3 sofa variants + 1 lamp + 60 plushies
        assert_eq!(total, 65);
    }

    #[test]
    fn test_variant_and_quantity_are_surgical() {
        let mut h = Harness::new(fixture::loaded_catalog());
        let out = h.run(Action::OpenItem(ItemRef::new(2, 0)));
        assert_eq!(out.render, Render::Full);
        assert!(out.effects.is_empty());

        let out = h.run(Action::SelectVariant(2));
        assert_eq!(patches(&out), vec![Patch::DetailVariant]);
        assert_eq!(h.state.detail.key(), Some(ItemRef::new(2, 2)));

        let out = h.run(Action::StepDetailQty(1));
        assert_eq!(patches(&out), vec![Patch::DetailQuantity]);
        assert_eq!(h.state.detail.qty, 2);

        let out = h.run(Action::AddDetailToCart);
        assert_eq!(patches(&out), vec![Patch::CartBadge, Patch::DetailQuantity, Patch::Toast]);
        let line = h.state.cart.line(ItemRef::new(2, 2)).unwrap();
        assert_eq!(line.qty, 2);
        assert_eq!(line.hex, "1002");
        assert_eq!(h.state.detail.qty, 1);
    }

    #[test]
    fn test_cart_write_happens_in_reducer() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::QuickAdd(ItemRef::new(1, 0)));
        let stored = h.persist.load_cart();
        assert_eq!(stored.total(), 1);
        assert_eq!(stored.entries()[0].hex, "0A3F");
        assert!(h.persist.get::<Option<serde_json::Value>>(KEY_CART, None).is_some());
    }

    #[test]
    fn test_forty_first_unit_is_refused() {
        let mut h = Harness::new(fixture::loaded_catalog());
        h.run(Action::OpenItem(ItemRef::new(3, 0)));
        for _ in 0..39 {
            h.run(Action::StepDetailQty(1));
        }
        assert_eq!(h.state.detail.qty, 40);
        h.run(Action::AddDetailToCart);
        assert_eq!(h.state.cart.total(), 40);

        h.run(Action::QuickAdd(ItemRef::new(1, 0)));
        assert_eq!(h.state.cart.total(), 40);
        assert_eq!(h.state.ui.toast.as_ref().map(|t| t.message.as_str()), Some("Your bag is full (40 / 40)"));

        h.run(Action::CartIncrement(ItemRef::new(3, 0)));
        assert_eq!(h.state.cart.total(), 40);
    }

    #[test]
    fn test_decrement_to_zero_is_structural() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::QuickAdd(ItemRef::new(1, 0)));
        h.run(Action::CartIncrement(ItemRef::new(1, 0)));
        assert_eq!(patches(&h.run(Action::CartDecrement(ItemRef::new(1, 0)))), vec![Patch::CartLine]);
        assert_eq!(h.run(Action::CartDecrement(ItemRef::new(1, 0))).render, Render::Full);
        assert!(h.state.cart.is_empty());
    }

    #[test]
    fn test_detail_for_other_item_is_ignored() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::OpenItem(ItemRef::new(1, 0)));
        h.run(Action::Navigate(Route::Cart));
        let item = fixture::items().remove(0);
        let out = h.run(Action::DetailLoaded { id: 1, result: Ok(Some(item)) });
        assert_eq!(out, Outcome::none());
        assert_eq!(h.state.route, Route::Cart);
    }

    #[test]
    fn test_missing_item_navigates_back_with_notice() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::Navigate(Route::Detail(999)));
        h.run(Action::DetailLoaded { id: 999, result: Ok(None) });
        assert_eq!(h.state.route, Route::Catalog);
        assert!(h.state.ui.toast.as_ref().is_some_and(|t| t.message.contains("no longer available")));
    }

    #[test]
    fn test_quick_heart_removes_from_every_list() {
        let mut h = Harness::new(fixture::catalog());
        let chair = ItemRef::new(1, 0);
        h.run(Action::CreateList { name: "Garden".to_string(), cap: None });
        let garden = h.state.ui.active_list.clone();
        h.run(Action::AddToList { list_id: garden.clone(), item: chair });
        assert!(!h.state.wishlists.is_loved(chair));

        h.run(Action::QuickHeart(chair));
        assert!(!h.state.wishlists.in_any_list(chair));

        h.run(Action::QuickHeart(chair));
        assert!(h.state.wishlists.is_loved(chair));
        assert!(h.persist.load_wishlists().is_loved(chair));
    }

    #[test]
    fn test_add_list_to_cart_reports_overflow() {
        let mut h = Harness::new(fixture::loaded_catalog());
        h.run(Action::OpenItem(ItemRef::new(3, 0)));
        for _ in 0..38 {
            h.run(Action::StepDetailQty(1));
        }
        h.run(Action::AddDetailToCart);
        assert_eq!(h.state.cart.total(), 39);

        for idx in 0..3 {
            h.run(Action::AddToList { list_id: DEFAULT_LIST_ID.to_string(), item: ItemRef::new(2, idx) });
        }
        h.run(Action::AddListToCart(DEFAULT_LIST_ID.to_string()));
        assert_eq!(h.state.cart.total(), 40);
        let toast = h.state.ui.toast.clone().unwrap();
        assert_eq!(toast.message, "Added 1 item to your bag; 2 didn't fit");
    }

    #[test]
    fn test_deleting_active_list_falls_back_to_loved() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::CreateList { name: "Tmp".to_string(), cap: Some(2) });
        let id = h.state.ui.active_list.clone();
        assert_ne!(id, DEFAULT_LIST_ID);
        h.run(Action::DeleteList(id));
        assert_eq!(h.state.ui.active_list, DEFAULT_LIST_ID);

        h.run(Action::DeleteList(DEFAULT_LIST_ID.to_string()));
        assert_eq!(h.state.wishlists.lists().len(), 1);
    }

    #[test]
    fn test_copy_failure_opens_manual_copy() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::QuickAdd(ItemRef::new(1, 0)));
        h.run(Action::QuickAdd(ItemRef::new(1, 0)));
        h.run(Action::QuickAdd(ItemRef::new(3, 0)));
        let out = h.run(Action::CopyCommand);
        let expected = "!order 0A3F, 0A3F, 1B2C".to_string();
        assert_eq!(out.effects, vec![Effect::CopyToClipboard(expected.clone())]);

        h.run(Action::CopyFinished { command: expected.clone(), copied: false });
        assert_eq!(h.state.ui.modal, Some(Modal::ManualCopy(expected)));
    }

    #[test]
    fn test_clear_all_data_resets_and_welcomes() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::FinishWelcome { prefix: "?".to_string() });
        h.run(Action::QuickAdd(ItemRef::new(1, 0)));
        h.run(Action::OpenModal(Modal::Confirm(Confirm::ClearAllData)));
        h.run(Action::ConfirmModal);

        assert!(h.state.cart.is_empty());
        assert_eq!(h.state.settings.prefix, "!");
        assert_eq!(h.state.ui.modal, Some(Modal::Welcome));
        assert_eq!(h.persist.load_prefix(), "!");
        assert!(h.persist.load_cart().is_empty());
    }

    #[test]
    fn test_toast_dismiss_only_matches_current() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::CopyCommand);
        let first = h.state.ui.toast.clone().unwrap().id;
        h.run(Action::CopyCommand);
        assert_eq!(h.run(Action::DismissToast(first)), Outcome::none());
        assert!(h.state.ui.toast.is_some());
    }

    #[test]
    fn test_failed_writes_are_reported() {
        let mut h = Harness::with_persist(fixture::catalog(), Persist::new(FullStore));

        let out = h.run(Action::QuickAdd(ItemRef::new(1, 0)));
        assert_eq!(h.state.cart.total(), 1);
        assert_eq!(toast(&h), Some("Couldn't save your bag; it will be lost on reload"));
        assert_eq!(patches(&out), vec![Patch::CartBadge, Patch::Toast]);

        h.run(Action::ToggleLoved(ItemRef::new(1, 0)));
        assert!(h.state.wishlists.is_loved(ItemRef::new(1, 0)));
        assert_eq!(toast(&h), Some("Couldn't save your wishlists; it will be lost on reload"));

        h.run(Action::SetPrefix("?".to_string()));
        assert_eq!(h.state.settings.prefix, "?");
        assert_eq!(toast(&h), Some("Couldn't save your prefix; it will be lost on reload"));

        h.run(Action::SetLoadMode(LoadMode::Continuous));
        assert_eq!(toast(&h), Some("Couldn't save the loading mode; it will be lost on reload"));
    }

    #[test]
    fn test_prefix_input_drops_order_keyword() {
        let mut h = Harness::new(fixture::catalog());
        h.run(Action::SetPrefix("*order".to_string()));
        assert_eq!(h.state.settings.prefix, "*");
        assert_eq!(h.persist.load_prefix(), "*");
        h.run(Action::QuickAdd(ItemRef::new(1, 0)));
        assert_eq!(h.run(Action::CopyCommand).effects, vec![Effect::CopyToClipboard("*order 0A3F".to_string())]);
    }
}
