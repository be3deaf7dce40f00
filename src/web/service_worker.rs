//! Offline worker registration. Absence or failure is logged, never fatal.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

pub async fn register(script: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false);
    if !supported {
        log::info!("[SW] service workers not supported");
        return;
    }

    match JsFuture::from(navigator.service_worker().register(script)).await {
        Ok(_) => log::info!("[SW] registered {}", script),
        Err(e) => log::warn!("[SW] registration of {} failed: {:?}", script, e),
    }
}
