//! ACNHEX App
//!
//! Root component: provides the store, starts the catalog load and switches
//! pages on the current route.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::actions::Action;
use crate::components::{
    BottomNav, CartPage, CatalogPage, DetailPage, Header, InfoPage, ModalHost, SearchOverlay, SettingsPage,
    ToastView, WishlistPage,
};
use crate::dispatch::dispatch;
use crate::runtime::runtime;
use crate::store::{AppState, AppStateStoreFields, Route};

#[component]
pub fn App() -> impl IntoView {
    let rt = runtime();
    let store = Store::new(AppState::load(&rt.persist, &rt.config));
    provide_context(store);

    // Load the catalog index on mount
    Effect::new(move |_| dispatch(store, Action::Start));

    let route = Memo::new(move |_| store.route().get());
    let page = move || match route.get() {
        Route::Catalog => view! { <CatalogPage /> }.into_any(),
        Route::Detail(_) => view! { <DetailPage /> }.into_any(),
        Route::Cart => view! { <CartPage /> }.into_any(),
        Route::Wishlist => view! { <WishlistPage /> }.into_any(),
        Route::Settings => view! { <SettingsPage /> }.into_any(),
        Route::Info => view! { <InfoPage /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <Header />
            <main class="main-content">{page}</main>
            <SearchOverlay />
            <BottomNav />
            <ModalHost />
            <ToastView />
        </div>
    }
}
