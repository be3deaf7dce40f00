//! Bottom Navigation Component

use leptos::prelude::*;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields, Route};

const NAV_ITEMS: &[(Route, &str, &str)] = &[
    (Route::Catalog, "🏠", "Catalog"),
    (Route::Wishlist, "♥", "Wishlist"),
    (Route::Cart, "👜", "Bag"),
    (Route::Settings, "⚙", "Settings"),
];

#[component]
pub fn BottomNav() -> impl IntoView {
    let store = use_app_store();
    let route = Memo::new(move |_| store.route().get());

    view! {
        <nav class="bottom-nav">
            {NAV_ITEMS.iter().map(|&(target, icon, label)| {
                let is_active = move || route.get() == target;
                view! {
                    <button
                        class=move || if is_active() { "nav-btn active" } else { "nav-btn" }
                        on:click=move |_| dispatch(store, Action::Navigate(target))
                    >
                        <span class="nav-icon">{icon}</span>
                        <span class="nav-label">{label}</span>
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
