//! Catalog Page Component
//!
//! Category chips, the grid heading, the item grid and its footer.

use acnhex_core::ExpandedEntry;
use leptos::prelude::*;

use crate::actions::{grid_source, Action};
use crate::components::{ItemCard, LoadSentinel};
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields, GridSource, LoadStatus};
use crate::view;
use crate::view::catalog::Footer;

/// Category chip row with the "all variants" toggle
#[component]
fn CategoryChips() -> impl IntoView {
    let store = use_app_store();
    let selected = Memo::new(move |_| store.filters().read().category.clone());
    let expanded = Memo::new(move |_| store.filters().read().expanded);

    view! {
        <div class="category-bar">
            <div class="category-chips">
                <button
                    class=move || if selected.get().is_none() { "chip active" } else { "chip" }
                    on:click=move |_| dispatch(store, Action::SelectCategory(None))
                >
                    "✨ Discover"
                </button>
                <For
                    each=move || store.categories().get()
                    key=|c| c.name.clone()
                    children=move |category| {
                        let name = category.name.clone();
                        let name_for_click = name.clone();
                        let is_selected = move || selected.get().as_deref() == Some(name.as_str());
                        view! {
                            <button
                                class=move || if is_selected() { "chip active" } else { "chip" }
                                on:click=move |_| dispatch(store, Action::SelectCategory(Some(name_for_click.clone())))
                            >
                                {category.emoji} " " {category.name}
                            </button>
                        }
                    }
                />
            </div>
            <Show when=move || selected.get().is_some()>
                <label class="expand-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || expanded.get()
                        on:change=move |ev| dispatch(store, Action::SetExpanded(event_target_checked(&ev)))
                    />
                    "Show every variant"
                </label>
            </Show>
        </div>
    }
}

#[component]
fn GridFooter() -> impl IntoView {
    let store = use_app_store();
    let footer = Memo::new(move |_| view::catalog::footer(&store.grid().read(), store.settings().read().load_mode));
    let shown = Signal::derive(move || store.grid().read().entries.len());

    move || match footer.get() {
        Footer::LoadMore { remaining } => view! {
            <button class="load-more-btn" on:click=move |_| dispatch(store, Action::LoadMore)>
                {format!("Load More ({} remaining)", remaining)}
            </button>
        }
        .into_any(),
        Footer::Sentinel => view! {
            <LoadSentinel armed_for=shown on_visible=move |_| dispatch(store, Action::LoadMore) />
        }
        .into_any(),
        Footer::Loading => view! { <div class="grid-loading">"Loading…"</div> }.into_any(),
        Footer::End => view! { <div class="grid-end">"That's everything!"</div> }.into_any(),
        Footer::Hidden => view! { <div></div> }.into_any(),
    }
}

#[component]
pub fn CatalogPage() -> impl IntoView {
    let store = use_app_store();
    let source = Memo::new(move |_| grid_source(&store.filters().read()));
    let status = Memo::new(move |_| store.grid().read().status.clone());
    let is_empty = Memo::new(move |_| store.grid().read().entries.is_empty());

    let heading = move || {
        let total = store.grid().read().total;
        view::catalog::heading(&source.get(), &store.filters().read(), &store.categories().read(), total)
    };

    let body = move || match (status.get(), is_empty.get()) {
        (LoadStatus::Failed(message), true) => view! {
            <div class="grid-error">
                <p>{message}</p>
                <button on:click=move |_| dispatch(store, Action::RetryGrid)>"Try again"</button>
            </div>
        }
        .into_any(),
        (LoadStatus::Ready, true) => {
            view! { <p class="grid-empty">{view::catalog::empty_message(&source.get())}</p> }.into_any()
        }
        (LoadStatus::Loading | LoadStatus::Idle, true) => {
            view! { <div class="grid-loading">"Loading catalog…"</div> }.into_any()
        }
        _ => view! {
            <div class="item-grid">
                <For
                    each=move || store.grid().read().entries.clone()
                    key=|entry: &ExpandedEntry| entry.key()
                    children=move |entry| view! { <ItemCard entry=entry /> }
                />
            </div>
            <GridFooter />
        }
        .into_any(),
    };

    view! {
        <section class="catalog-page">
            <CategoryChips />
            <Show when=move || source.get() == GridSource::Discover>
                <p class="discover-hint">"A random pick from the whole catalog. Scroll for more."</p>
            </Show>
            <h2 class="grid-heading">{heading}</h2>
            {body}
        </section>
    }
}
