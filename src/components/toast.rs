//! Toast Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ToastView() -> impl IntoView {
    let store = use_app_store();
    let toast = Memo::new(move |_| store.ui().read().toast.clone());

    view! {
        {move || toast.get().map(|t| view! {
            <div class="toast" role="status">{t.message}</div>
        })}
    }
}
