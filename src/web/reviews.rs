//! Bridge to the page's optional `generateReviewSection(item)` script.

use acnhex_core::CatalogItem;
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    pub html: String,
    pub avg_rating: Option<f64>,
}

/// `None` when the script is not loaded or returns something unexpected.
pub fn review_section(item: &CatalogItem) -> Option<Review> {
    let window = web_sys::window()?;
    let generate = Reflect::get(&window, &JsValue::from_str("generateReviewSection"))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;

    let arg = serde_wasm_bindgen::to_value(item).ok()?;
    let result = match generate.call1(&JsValue::NULL, &arg) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("[REVIEWS] generator threw for item {}: {:?}", item.id, e);
            return None;
        }
    };

    let html = Reflect::get(&result, &JsValue::from_str("html")).ok()?.as_string()?;
    let avg_rating = Reflect::get(&result, &JsValue::from_str("avgRating"))
        .ok()
        .and_then(|v| v.as_f64());
    Some(Review { html, avg_rating })
}
