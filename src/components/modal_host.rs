//! Modal Host Component
//!
//! Renders whichever modal `ui.modal` names. Clicking the backdrop closes it.

use acnhex_core::{ItemRef, DEFAULT_PREFIX};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields, Confirm, Modal};

#[component]
fn WelcomeModal() -> impl IntoView {
    let store = use_app_store();
    let (prefix, set_prefix) = signal(store.settings().read_untracked().prefix.clone());

    view! {
        <h2>"Welcome to ACNHEX!"</h2>
        <p>"Browse the catalog, fill your bag with up to 40 items, then copy the order command for the bot."</p>
        <label for="welcome-prefix-input">"What prefix does your order bot use?"</label>
        <input
            id="welcome-prefix-input"
            type="text"
            maxlength="4"
            placeholder=DEFAULT_PREFIX
            prop:value=move || prefix.get()
            on:input=move |ev| set_prefix.set(event_target_value(&ev))
        />
        <div class="modal-actions">
            <button
                class="primary-btn"
                on:click=move |_| dispatch(store, Action::FinishWelcome { prefix: prefix.get_untracked() })
            >
                "Start browsing"
            </button>
        </div>
    }
}

#[component]
fn ConfirmModal(confirm: Confirm) -> impl IntoView {
    let store = use_app_store();
    let (title, body, action) = match confirm {
        Confirm::ClearCart => ("Clear your bag?", "Every item in your bag will be removed.", "Clear bag"),
        Confirm::ClearAllData => (
            "Clear all data?",
            "Your bag, wishlists and preferences will be deleted from this device.",
            "Delete everything",
        ),
    };

    view! {
        <h2>{title}</h2>
        <p>{body}</p>
        <div class="modal-actions">
            <button on:click=move |_| dispatch(store, Action::CloseModal)>"Cancel"</button>
            <button class="danger-btn" on:click=move |_| dispatch(store, Action::ConfirmModal)>{action}</button>
        </div>
    }
}

#[component]
fn ListPickerModal(item: ItemRef) -> impl IntoView {
    let store = use_app_store();
    let lists = Memo::new(move |_| {
        store
            .wishlists()
            .read()
            .lists()
            .iter()
            .map(|l| (l.id.clone(), l.name.clone(), l.contains(item), l.is_full()))
            .collect::<Vec<_>>()
    });

    view! {
        <h2>"Add to list"</h2>
        <ul class="list-picker">
            {move || lists.get().into_iter().map(|(id, name, contains, full)| view! {
                <li>
                    <button
                        class=if contains { "list-option contains" } else { "list-option" }
                        disabled=full
                        on:click=move |_| dispatch(store, Action::AddToList { list_id: id.clone(), item })
                    >
                        {if contains { "✓ " } else { "" }} {name}
                    </button>
                </li>
            }).collect_view()}
        </ul>
        <div class="modal-actions">
            <button on:click=move |_| dispatch(store, Action::OpenModal(Modal::CreateList))>"+ New list"</button>
            <button on:click=move |_| dispatch(store, Action::CloseModal)>"Done"</button>
        </div>
    }
}

#[component]
fn CreateListModal() -> impl IntoView {
    let store = use_app_store();
    let (name, set_name) = signal(String::new());
    let (cap, set_cap) = signal(String::new());

    let submit = move || {
        let cap = cap.get_untracked().trim().parse::<usize>().ok().filter(|&c| c > 0);
        dispatch(store, Action::CreateList { name: name.get_untracked(), cap });
    };

    view! {
        <h2>"New list"</h2>
        <label for="new-list-name">"Name"</label>
        <input
            id="new-list-name"
            type="text"
            placeholder="Garden build"
            prop:value=move || name.get()
            on:input=move |ev| set_name.set(event_target_value(&ev))
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if ev.key() == "Enter" {
                    submit();
                }
            }
        />
        <label for="new-list-cap">"Item limit (optional)"</label>
        <input
            id="new-list-cap"
            type="number"
            min="1"
            prop:value=move || cap.get()
            on:input=move |ev| set_cap.set(event_target_value(&ev))
        />
        <div class="modal-actions">
            <button on:click=move |_| dispatch(store, Action::CloseModal)>"Cancel"</button>
            <button class="primary-btn" disabled=move || name.get().trim().is_empty() on:click=move |_| submit()>
                "Create"
            </button>
        </div>
    }
}

#[component]
fn ManualCopyModal(command: String) -> impl IntoView {
    let store = use_app_store();

    view! {
        <h2>"Copy your order"</h2>
        <p>"Your browser blocked clipboard access. Select the command below and copy it."</p>
        <textarea
            class="manual-copy"
            readonly
            prop:value=command
            on:focus=move |ev| {
                if let Some(area) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok()) {
                    area.select();
                }
            }
        ></textarea>
        <div class="modal-actions">
            <button on:click=move |_| dispatch(store, Action::CloseModal)>"Close"</button>
        </div>
    }
}

#[component]
pub fn ModalHost() -> impl IntoView {
    let store = use_app_store();
    let modal = Memo::new(move |_| store.ui().read().modal.clone());

    move || {
        let body = match modal.get()? {
            Modal::Welcome => view! { <WelcomeModal /> }.into_any(),
            Modal::Confirm(confirm) => view! { <ConfirmModal confirm=confirm /> }.into_any(),
            Modal::ListPicker(item) => view! { <ListPickerModal item=item /> }.into_any(),
            Modal::CreateList => view! { <CreateListModal /> }.into_any(),
            Modal::ManualCopy(command) => view! { <ManualCopyModal command=command /> }.into_any(),
        };
        Some(view! {
            <div class="modal-backdrop" on:click=move |_| dispatch(store, Action::CloseModal)>
                <div class="modal" role="dialog" on:click=|ev| ev.stop_propagation()>
                    {body}
                </div>
            </div>
        })
    }
}
