//! Wishlist Page Component
//!
//! List tabs, the active list's cards and the list-level actions.

use leptos::prelude::*;

use crate::actions::{display_name, Action};
use crate::components::ListDeleteButton;
use crate::dispatch::dispatch;
use crate::runtime::runtime;
use crate::store::{use_app_store, AppStateStoreFields, Modal};
use crate::view;
use crate::view::wishlist::WishCard;

#[component]
fn ListTabs() -> impl IntoView {
    let store = use_app_store();
    let tabs = Memo::new(move |_| view::wishlist::tabs(&store.wishlists().read(), &store.ui().read().active_list));

    view! {
        <div class="list-tabs">
            {move || tabs.get().into_iter().map(|tab| {
                let id = tab.id.clone();
                let delete_id = tab.id.clone();
                let delete_name = tab.name.clone();
                view! {
                    <div class=if tab.active { "list-tab active" } else { "list-tab" }>
                        <button class="list-tab-btn" on:click=move |_| dispatch(store, Action::SelectList(id.clone()))>
                            {tab.name} " " <span class="list-count">{tab.count_label}</span>
                        </button>
                        {tab.deletable.then(|| view! {
                            <ListDeleteButton list_id=delete_id name=delete_name />
                        })}
                    </div>
                }
            }).collect_view()}
            <button class="list-tab new-list" on:click=move |_| dispatch(store, Action::OpenModal(Modal::CreateList))>
                "+ New list"
            </button>
        </div>
    }
}

#[component]
fn WishCardView(card: WishCard, list_id: String) -> impl IntoView {
    let store = use_app_store();
    let key = card.key;
    let index = card.index;

    let body = match card.entry {
        Some(entry) => {
            let title = display_name(&entry.name, &entry.variant_label);
            view! {
                <div class="wish-card-body" on:click=move |_| dispatch(store, Action::OpenItem(key))>
                    <img src=entry.image alt=title.clone() loading="lazy" />
                    <span class="item-name">{title}</span>
                    <span class="item-hex">{entry.hex}</span>
                </div>
            }
            .into_any()
        }
        None => view! {
            <div class="wish-card-body placeholder">
                <span class="item-name">{format!("Item #{}", key.id)}</span>
                <span class="item-hex">"Loading…"</span>
            </div>
        }
        .into_any(),
    };

    view! {
        <article class="wish-card">
            {body}
            <button
                class="remove-btn"
                title="Remove from list"
                on:click=move |_| dispatch(store, Action::RemoveFromList { list_id: list_id.clone(), index })
            >
                "×"
            </button>
        </article>
    }
}

#[component]
pub fn WishlistPage() -> impl IntoView {
    let store = use_app_store();
    let active = Memo::new(move |_| store.ui().read().active_list.clone());
    let active_name = Memo::new(move |_| {
        store.wishlists().read().list(&active.get()).map(|l| l.name.clone()).unwrap_or_default()
    });
    let is_default = Memo::new(move |_| {
        store.wishlists().read().list(&active.get()).is_some_and(|l| l.is_default())
    });
    let cards = Memo::new(move |_| {
        let _ = store.catalog_version().get();
        let rt = runtime();
        view::wishlist::cards(&store.wishlists().read(), &active.get(), |r| rt.catalog.resolve(r))
    });

    view! {
        <section class="wishlist-page">
            <ListTabs />
            <div class="list-header">
                <Show
                    when=move || !is_default.get()
                    fallback=move || view! { <h2>{move || active_name.get()}</h2> }
                >
                    <input
                        id="list-name-input"
                        class="list-name-input"
                        type="text"
                        prop:value=move || active_name.get()
                        on:change=move |ev| dispatch(store, Action::RenameList {
                            list_id: active.get_untracked(),
                            name: event_target_value(&ev),
                        })
                    />
                </Show>
                <button
                    class="add-all-btn"
                    disabled=move || cards.get().is_empty()
                    on:click=move |_| dispatch(store, Action::AddListToCart(active.get_untracked()))
                >
                    "Add all to bag"
                </button>
            </div>
            <Show
                when=move || !cards.get().is_empty()
                fallback=|| view! { <p class="list-empty">"Nothing here yet. Tap ♡ on an item to save it."</p> }
            >
                <div class="wish-grid">
                    {move || {
                        let list_id = active.get();
                        cards.get().into_iter().map(|card| {
                            view! { <WishCardView card=card list_id=list_id.clone() /> }
                        }).collect_view()
                    }}
                </div>
            </Show>
        </section>
    }
}
