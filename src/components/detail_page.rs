//! Detail Page Component
//!
//! Full item view: variant picker, quantity stepper, bag and wishlist
//! buttons, item info and the optional review section.

use acnhex_core::{CatalogItem, ItemRef};
use leptos::prelude::*;

use crate::actions::Action;
use crate::dispatch::dispatch;
use crate::store::{use_app_store, AppStateStoreFields, LoadStatus, Route};
use crate::view;
use crate::web::reviews;

#[component]
fn Reviews(item: CatalogItem) -> impl IntoView {
    let Some(review) = reviews::review_section(&item) else {
        return view! { <div></div> }.into_any();
    };
    view! {
        <section class="reviews">
            <h3>
                "Villager Reviews"
                {review.avg_rating.map(|r| view! { <span class="avg-rating">{format!(" ★ {:.1}", r)}</span> })}
            </h3>
            <div class="review-body" inner_html=review.html></div>
        </section>
    }
    .into_any()
}

#[component]
fn DetailBody(item: CatalogItem) -> impl IntoView {
    let store = use_app_store();
    let id = item.id;
    let name = item.name.clone();
    let reviews_item = item.clone();
    let item = StoredValue::new(item);

    let variant_idx = move || store.detail().read().variant_idx;
    let qty = move || store.detail().read().qty;
    let key = move || ItemRef::new(id, variant_idx());
    let loved = move || store.wishlists().read().is_loved(key());

    let image = move || item.with_value(|i| i.variant(variant_idx()).map(|v| v.image.clone()).unwrap_or_default());
    let swatches = move || item.with_value(|i| view::detail::swatches(i, variant_idx()));
    let rows = move || item.with_value(|i| view::detail::info_rows(i, variant_idx()));
    let add_label = move || view::detail::add_label(qty(), &store.cart().read());
    let in_bag = move || store.cart().read().quantity_of(key());

    view! {
        <article class="detail-page">
            <button class="back-btn" on:click=move |_| dispatch(store, Action::Navigate(Route::Catalog))>
                "← Back"
            </button>
            <div class="detail-image">
                <img src=image alt=name.clone() />
            </div>
            <h1 class="detail-title">{name}</h1>

            <Show when=move || item.with_value(|i| i.variants.len() > 1)>
                <div class="variant-picker">
                    {move || swatches().into_iter().map(|s| {
                        let idx = s.idx;
                        let title = s.label.clone();
                        let alt = s.label.clone();
                        view! {
                            <button
                                class=if s.selected { "variant-swatch selected" } else { "variant-swatch" }
                                title=title
                                on:click=move |_| dispatch(store, Action::SelectVariant(idx))
                            >
                                <img src=s.image alt=alt />
                                <span>{s.label}</span>
                            </button>
                        }
                    }).collect_view()}
                </div>
            </Show>

            <div class="detail-actions">
                <div class="qty-stepper">
                    <button on:click=move |_| dispatch(store, Action::StepDetailQty(-1))>"−"</button>
                    <span class="qty">{qty}</span>
                    <button on:click=move |_| dispatch(store, Action::StepDetailQty(1))>"+"</button>
                </div>
                <button
                    class="add-to-bag-btn"
                    disabled=move || store.cart().read().is_full()
                    on:click=move |_| dispatch(store, Action::AddDetailToCart)
                >
                    {add_label}
                </button>
                <button
                    class=move || if loved() { "heart-btn active" } else { "heart-btn" }
                    on:click=move |_| dispatch(store, Action::ToggleLoved(key()))
                >
                    {move || if loved() { "♥" } else { "♡" }}
                </button>
                <button class="list-btn" on:click=move |_| dispatch(store, Action::OpenListPicker(key()))>
                    "Add to list"
                </button>
            </div>
            <Show when=move || { in_bag() > 0 }>
                <p class="in-bag-note">{move || format!("{} in your bag", in_bag())}</p>
            </Show>

            <dl class="detail-info">
                {move || rows().into_iter().map(|(label, value)| view! {
                    <dt>{label}</dt>
                    <dd>{value}</dd>
                }).collect_view()}
            </dl>

            <Reviews item=reviews_item />
        </article>
    }
}

#[component]
pub fn DetailPage() -> impl IntoView {
    let store = use_app_store();
    let item = Memo::new(move |_| store.detail().read().item.clone());
    let status = Memo::new(move |_| store.detail().read().status.clone());

    move || match (item.get(), status.get()) {
        (Some(item), _) => view! { <DetailBody item=item /> }.into_any(),
        (None, LoadStatus::Failed(message)) => view! {
            <div class="detail-error">
                <p>{message}</p>
                <button on:click=move |_| dispatch(store, Action::RetryDetail)>"Try again"</button>
                <button on:click=move |_| dispatch(store, Action::Navigate(Route::Catalog))>"Back to catalog"</button>
            </div>
        }
        .into_any(),
        (None, _) => view! { <div class="detail-loading">"Loading item…"</div> }.into_any(),
    }
}
