//! Cart Page Component
//!
//! Bag lines with quantity steppers, the generated order command and the
//! copy / clear buttons.

use acnhex_core::CartEntry;
use leptos::prelude::*;

use crate::actions::{display_name, Action};
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields, Confirm, Modal, Route};
use crate::view;

#[component]
fn CartLine(entry: CartEntry) -> impl IntoView {
    let store = use_app_store();
    let key = entry.key();
    let qty = move || store.cart().read().quantity_of(key);
    let is_full = move || store.cart().read().is_full();
    let title = display_name(&entry.name, &entry.variant_label);

    view! {
        <li class="cart-line">
            <img
                class="cart-line-image"
                src=entry.image
                alt=title.clone()
                on:click=move |_| dispatch(store, Action::OpenItem(key))
            />
            <div class="cart-line-body">
                <span class="item-name">{title}</span>
                <span class="item-hex">{entry.hex}</span>
            </div>
            <div class="qty-stepper">
                <button on:click=move |_| dispatch(store, Action::CartDecrement(key))>"−"</button>
                <span class="qty">{qty}</span>
                <button disabled=is_full on:click=move |_| dispatch(store, Action::CartIncrement(key))>"+"</button>
            </div>
            <button class="remove-btn" title="Remove" on:click=move |_| dispatch(store, Action::CartRemove(key))>
                "×"
            </button>
        </li>
    }
}

#[component]
pub fn CartPage() -> impl IntoView {
    let store = use_app_store();
    let summary = Memo::new(move |_| view::cart::summary(&store.cart().read(), &store.settings().read().prefix));
    let is_empty = Memo::new(move |_| summary.get().is_empty);

    view! {
        <section class="cart-page">
            <h2>"Your Bag"</h2>
            <Show
                when=move || !is_empty.get()
                fallback=move || view! {
                    <div class="cart-empty">
                        <p>"Your bag is empty."</p>
                        <button on:click=move |_| dispatch(store, Action::Navigate(Route::Catalog))>
                            "Browse the catalog"
                        </button>
                    </div>
                }
            >
                <p class=move || if summary.get().is_full { "cart-count full" } else { "cart-count" }>
                    {move || summary.get().count_label}
                </p>
                <ul class="cart-lines">
                    <For
                        each=move || store.cart().read().entries().to_vec()
                        key=|entry: &CartEntry| entry.key()
                        children=move |entry| view! { <CartLine entry=entry /> }
                    />
                </ul>
                <div class="order-command">
                    <label>"Order command"</label>
                    <code>{move || summary.get().command}</code>
                </div>
                <div class="cart-actions">
                    <button class="copy-btn" on:click=move |_| dispatch(store, Action::CopyCommand)>
                        "Copy command"
                    </button>
                    <button
                        class="clear-btn"
                        on:click=move |_| dispatch(store, Action::OpenModal(Modal::Confirm(Confirm::ClearCart)))
                    >
                        "Clear bag"
                    </button>
                </div>
            </Show>
        </section>
    }
}
