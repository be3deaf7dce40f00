//! Item Card Component
//!
//! One grid tile: picture, name, hex, and the quick heart / quick add / list
//! shortcuts.

use acnhex_core::ExpandedEntry;
use leptos::prelude::*;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::view;

#[component]
pub fn ItemCard(entry: ExpandedEntry) -> impl IntoView {
    let store = use_app_store();
    let card = view::catalog::card(&entry, &store.cart().read_untracked(), &store.wishlists().read_untracked());
    let key = card.key;

    let in_bag = move || store.cart().read().quantity_of(key);
    let hearted = move || store.wishlists().read().in_any_list(key);

    view! {
        <article class="item-card" on:click=move |_| dispatch(store, Action::OpenItem(key))>
            <div class="item-card-image">
                <img src=card.image alt=card.title.clone() loading="lazy" />
                {card.variant_badge.map(|badge| view! { <span class="variant-badge">{badge}</span> })}
                {move || (in_bag() > 0).then(|| view! { <span class="in-bag-badge">{in_bag()}</span> })}
            </div>
            <div class="item-card-body">
                <span class="item-name">{card.title}</span>
                <span class="item-hex">{card.hex}</span>
            </div>
            <div class="item-card-actions">
                <button
                    class=move || if hearted() { "heart-btn active" } else { "heart-btn" }
                    title="Love"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        dispatch(store, Action::QuickHeart(key));
                    }
                >
                    {move || if hearted() { "♥" } else { "♡" }}
                </button>
                <button
                    class="list-btn"
                    title="Add to list"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        dispatch(store, Action::OpenListPicker(key));
                    }
                >
                    "☰"
                </button>
                <button
                    class="quick-add-btn"
                    title="Add to bag"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        dispatch(store, Action::QuickAdd(key));
                    }
                >
                    "+"
                </button>
            </div>
        </article>
    }
}
