//! Header Component
//!
//! Brand, search button and the bag button with its item count badge.

use leptos::prelude::*;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields, Route};
use crate::view;

#[component]
pub fn Header() -> impl IntoView {
    let store = use_app_store();
    let badge = move || view::cart::badge(&store.cart().read());

    view! {
        <header class="app-header">
            <button class="brand" on:click=move |_| dispatch(store, Action::Navigate(Route::Catalog))>
                "ACNHEX"
            </button>
            <div class="header-actions">
                <button class="icon-btn" title="Search" on:click=move |_| dispatch(store, Action::OpenSearch)>
                    "🔍"
                </button>
                <button
                    class="icon-btn bag-btn"
                    title="Bag"
                    on:click=move |_| dispatch(store, Action::Navigate(Route::Cart))
                >
                    "👜"
                    {move || badge().map(|count| view! { <span class="bag-badge">{count}</span> })}
                </button>
            </div>
        </header>
    }
}
