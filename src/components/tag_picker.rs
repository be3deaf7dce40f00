//! Tag Picker Component
//!
//! Fuzzy-matching tag finder for the filter panel. Picking a suggestion
//! toggles it as a filter tag and clears the input.

use leptos::prelude::*;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::view;

const SUGGESTION_LIMIT: usize = 6;

#[component]
pub fn TagPicker() -> impl IntoView {
    let store = use_app_store();
    let (input_value, set_input_value) = signal(String::new());
    let (selected_idx, set_selected_idx) = signal(0usize);

    let suggestions = Memo::new(move |_| {
        view::filters::tag_suggestions(
            &store.tag_vocabulary().read(),
            &input_value.get(),
            &store.filters().read().tags,
            SUGGESTION_LIMIT,
        )
    });

    let pick = move |tag: String| {
        set_input_value.set(String::new());
        set_selected_idx.set(0);
        dispatch(store, Action::ToggleTag(tag));
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = suggestions.get_untracked();
        let sel = selected_idx.get_untracked();
        match ev.key().as_str() {
            "Tab" | "Enter" => {
                if let Some(tag) = sugg.get(sel) {
                    ev.prevent_default();
                    pick(tag.clone());
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                if sel > 0 {
                    set_selected_idx.set(sel - 1);
                }
            }
            _ => {}
        }
    };

    view! {
        <div class="tag-input-wrapper">
            <input
                id="tag-finder-input"
                type="text"
                placeholder="Find a tag…"
                autocomplete="off"
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    set_input_value.set(event_target_value(&ev));
                    set_selected_idx.set(0);
                }
                on:keydown=on_keydown
            />
            {move || {
                let sugg = suggestions.get();
                if sugg.is_empty() {
                    return view! { <div></div> }.into_any();
                }
                let selected = selected_idx.get();
                view! {
                    <div class="autocomplete-list">
                        {sugg.into_iter().enumerate().map(|(i, tag)| {
                            let label = view::filters::tag_label(&tag);
                            view! {
                                <button
                                    type="button"
                                    class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        pick(tag.clone());
                                    }
                                >
                                    {label}
                                </button>
                            }
                        }).collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
