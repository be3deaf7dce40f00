//! Settings Page Component

use acnhex_core::LoadMode;
use leptos::prelude::*;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields, Confirm, Modal, Route};

const LOAD_MODES: &[(LoadMode, &str, &str)] = &[
    (LoadMode::Batch, "Load More button", "Show a button under the grid for the next page."),
    (LoadMode::Continuous, "Continuous scroll", "Load the next page as you reach the bottom."),
];

#[component]
pub fn SettingsPage() -> impl IntoView {
    let store = use_app_store();
    let prefix = Memo::new(move |_| store.settings().read().prefix.clone());
    let load_mode = Memo::new(move |_| store.settings().read().load_mode);

    view! {
        <section class="settings-page">
            <h2>"Settings"</h2>

            <div class="setting">
                <label for="prefix-input">"Order bot prefix"</label>
                <input
                    id="prefix-input"
                    type="text"
                    maxlength="4"
                    prop:value=move || prefix.get()
                    on:change=move |ev| dispatch(store, Action::SetPrefix(event_target_value(&ev)))
                />
                <p class="setting-hint">
                    "Commands will look like " <code>{move || format!("{}order 0A3F", prefix.get())}</code>
                </p>
            </div>

            <fieldset class="setting">
                <legend>"Loading"</legend>
                {LOAD_MODES.iter().map(|&(mode, label, hint)| view! {
                    <label class="radio-row">
                        <input
                            type="radio"
                            name="load-mode"
                            prop:checked=move || load_mode.get() == mode
                            on:change=move |_| dispatch(store, Action::SetLoadMode(mode))
                        />
                        <span class="radio-label">{label}</span>
                        <span class="setting-hint">{hint}</span>
                    </label>
                }).collect_view()}
            </fieldset>

            <div class="setting danger">
                <button
                    class="clear-data-btn"
                    on:click=move |_| dispatch(store, Action::OpenModal(Modal::Confirm(Confirm::ClearAllData)))
                >
                    "Clear all data"
                </button>
                <p class="setting-hint">"Removes your bag, wishlists and preferences from this device."</p>
            </div>

            <button class="link-btn" on:click=move |_| dispatch(store, Action::Navigate(Route::Info))>
                "How to use ACNHEX"
            </button>
        </section>
    }
}
