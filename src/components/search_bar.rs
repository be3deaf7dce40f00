//! Search Overlay Component
//!
//! Search input with debounced querying, active filter chips and the
//! collapsible filter panel.

use leptos::prelude::*;

use crate::actions::Action;
use crate::components::FilterPanel;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::view;

#[component]
pub fn SearchOverlay() -> impl IntoView {
    let store = use_app_store();
    let open = Memo::new(move |_| store.ui().read().search_open);
    let draft = Memo::new(move |_| store.filters().read().draft.clone());
    let tags = Memo::new(move |_| store.filters().read().tags.iter().cloned().collect::<Vec<_>>());
    let panel_open = Memo::new(move |_| store.ui().read().filter_panel_open);

    let on_keydown = move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            dispatch(store, Action::SubmitSearch);
        }
        "Escape" => dispatch(store, Action::CloseSearch),
        _ => {}
    };

    view! {
        <Show when=move || open.get()>
            <div class="search-overlay">
                <div class="search-row">
                    <input
                        id="search-input"
                        type="search"
                        placeholder="Search by name, hex or tag"
                        autocomplete="off"
                        autofocus
                        prop:value=move || draft.get()
                        on:input=move |ev| dispatch(store, Action::SearchInput(event_target_value(&ev)))
                        on:keydown=on_keydown
                    />
                    <Show when=move || !draft.get().is_empty()>
                        <button class="icon-btn" title="Clear" on:click=move |_| dispatch(store, Action::ClearSearch)>
                            "⌫"
                        </button>
                    </Show>
                    <button
                        class=move || if panel_open.get() { "filter-toggle active" } else { "filter-toggle" }
                        on:click=move |_| dispatch(store, Action::ToggleFilterPanel)
                    >
                        {move || match tags.get().len() {
                            0 => "Filters".to_string(),
                            n => format!("Filters ({})", n),
                        }}
                    </button>
                    <button class="icon-btn" title="Close search" on:click=move |_| dispatch(store, Action::CloseSearch)>
                        "✕"
                    </button>
                </div>
                <div class="active-tags">
                    <For
                        each=move || tags.get()
                        key=|tag| tag.clone()
                        children=move |tag| {
                            let label = view::filters::tag_label(&tag);
                            view! {
                                <button class="tag-chip" on:click=move |_| dispatch(store, Action::ToggleTag(tag.clone()))>
                                    {label} " ×"
                                </button>
                            }
                        }
                    />
                </div>
                <FilterPanel />
            </div>
        </Show>
    }
}
