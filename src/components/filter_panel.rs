//! Filter Panel Component
//!
//! Color scope switch, color chips and the tag finder.

use leptos::prelude::*;

use crate::actions::Action;
use crate::components::TagPicker;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields, ColorScope};
use crate::view;

const SCOPES: &[(ColorScope, &str)] = &[
    (ColorScope::Any, "Any"),
    (ColorScope::Primary, "Main color"),
    (ColorScope::Secondary, "Accent color"),
];

#[component]
pub fn FilterPanel() -> impl IntoView {
    let store = use_app_store();
    let open = Memo::new(move |_| store.ui().read().filter_panel_open);
    let scope = Memo::new(move |_| store.filters().read().color_scope);
    let chips = Memo::new(move |_| view::filters::color_chips(&store.filters().read().tags, scope.get()));
    let has_tags = Memo::new(move |_| !store.filters().read().tags.is_empty());

    view! {
        <Show when=move || open.get()>
            <div class="filter-panel">
                <div class="scope-switch">
                    {SCOPES.iter().map(|&(value, label)| view! {
                        <button
                            class=move || if scope.get() == value { "scope-btn active" } else { "scope-btn" }
                            on:click=move |_| dispatch(store, Action::SetColorScope(value))
                        >
                            {label}
                        </button>
                    }).collect_view()}
                </div>
                <div class="color-chips">
                    {move || chips.get().into_iter().map(|chip| {
                        let tag = chip.tag.clone();
                        view! {
                            <button
                                class=if chip.active { "color-chip active" } else { "color-chip" }
                                title=chip.color
                                on:click=move |_| dispatch(store, Action::ToggleTag(tag.clone()))
                            >
                                <span class="swatch" style=format!("background: {}", chip.swatch)></span>
                                {chip.color}
                            </button>
                        }
                    }).collect_view()}
                </div>
                <TagPicker />
                <Show when=move || has_tags.get()>
                    <button class="clear-tags-btn" on:click=move |_| dispatch(store, Action::ClearTags)>
                        "Clear filters"
                    </button>
                </Show>
            </div>
        </Show>
    }
}
