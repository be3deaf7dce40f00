//! List Delete Button Component

use leptos::prelude::*;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::use_app_store;

/// × on a wishlist tab; a second click on "Delete Garden?" removes the list.
#[component]
pub fn ListDeleteButton(list_id: String, name: String) -> impl IntoView {
    let store = use_app_store();
    let (armed, set_armed) = signal(false);
    let list_id = StoredValue::new(list_id);
    let prompt = format!("Delete {}?", name);

    move || {
        if !armed.get() {
            return view! {
                <button
                    class="list-delete-btn"
                    title="Delete list"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(true);
                    }
                >
                    "×"
                </button>
            }
            .into_any();
        }
        view! {
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(false);
                        dispatch(store, Action::DeleteList(list_id.get_value()));
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_armed.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        }
        .into_any()
    }
}
