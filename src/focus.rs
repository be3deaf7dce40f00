//! Keeps typing uninterrupted across re-renders: the focused text input's id
//! and selection are captured before a dispatch and restored after paint.

use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

#[derive(Clone, Debug, PartialEq)]
pub struct FocusSnapshot {
    id: String,
    start: Option<u32>,
    end: Option<u32>,
}

fn focused_input() -> Option<HtmlInputElement> {
    web_sys::window()?
        .document()?
        .active_element()?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

pub fn capture() -> Option<FocusSnapshot> {
    let input = focused_input()?;
    let id = input.id();
    if id.is_empty() {
        return None;
    }
    Some(FocusSnapshot {
        id,
        start: input.selection_start().ok().flatten(),
        end: input.selection_end().ok().flatten(),
    })
}

fn restore(snapshot: &FocusSnapshot) {
    if focused_input().is_some_and(|el| el.id() == snapshot.id) {
        return;
    }
    let Some(input) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&snapshot.id))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let _ = input.focus();
    if let (Some(start), Some(end)) = (snapshot.start, snapshot.end) {
        let _ = input.set_selection_range(start, end);
    }
}

/// Restore on the next tick, after Leptos has applied the DOM changes.
pub fn restore_after_paint(snapshot: Option<FocusSnapshot>) {
    let Some(snapshot) = snapshot else {
        return;
    };
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        restore(&snapshot);
    });
}
