//! Info Page Component

use leptos::prelude::*;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, Route};

#[component]
pub fn InfoPage() -> impl IntoView {
    let store = use_app_store();

    view! {
        <section class="info-page">
            <h2>"How it works"</h2>
            <ol class="info-steps">
                <li>"Browse a category, or open search to filter by name, hex ID or tag."</li>
                <li>"Tap + on a card, or pick a variant on the item page and add it to your bag."</li>
                <li>"Your bag holds up to 40 items. Open it and copy the order command."</li>
                <li>"Paste the command into the order bot's channel and wait for delivery."</li>
            </ol>

            <h3>"Wishlists"</h3>
            <p>
                "♡ saves an item to Loved Items. Make extra lists for builds or friends, "
                "then send a whole list to your bag at once."
            </p>

            <h3>"Install"</h3>
            <p>
                "ACNHEX works offline once loaded. Use your browser's \"Add to Home Screen\" "
                "to keep it one tap away."
            </p>

            <h3>"Your data"</h3>
            <p>"Your bag, lists and prefix are stored only in this browser."</p>

            <button class="link-btn" on:click=move |_| dispatch(store, Action::Navigate(Route::Settings))>
                "← Back to settings"
            </button>
        </section>
    }
}
