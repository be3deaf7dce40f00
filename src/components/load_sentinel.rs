//! Load Sentinel Component
//!
//! Continuous-mode trigger at the bottom of the grid. The observer
//! disconnects as soon as it fires and is rebuilt when the grid grows, so one
//! scroll past the bottom asks for exactly one batch.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

#[component]
pub fn LoadSentinel(
    /// Changes whenever a batch lands; re-arms the observer
    #[prop(into)]
    armed_for: Signal<usize>,
    #[prop(into)] on_visible: Callback<()>,
) -> impl IntoView {
    let sentinel = NodeRef::<html::Div>::new();

    Effect::new(move |previous: Option<Option<(IntersectionObserver, ObserverCallback)>>| {
        if let Some(Some((observer, _))) = previous {
            observer.disconnect();
        }
        let _ = armed_for.get();
        let element = sentinel.get()?;

        let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let visible = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .any(|e| e.is_intersecting());
            if visible {
                observer.disconnect();
                on_visible.run(());
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_root_margin("400px");
        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
                Ok(observer) => observer,
                Err(e) => {
                    log::warn!("[GRID] IntersectionObserver unavailable: {:?}", e);
                    return None;
                }
            };
        observer.observe(&element);
        Some((observer, callback))
    });

    view! { <div class="load-sentinel" node_ref=sentinel></div> }
}
