//! Clipboard
//!
//! Async Clipboard API first, then the legacy `execCommand("copy")` path.
//! When both fail the caller shows the text for manual selection.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["navigator", "clipboard"], js_name = writeText)]
    async fn write_text(text: &str) -> Result<JsValue, JsValue>;
}

/// Copy `text`, trying the modern API and then the legacy one
pub async fn copy_text(text: &str) -> Result<(), String> {
    match write_text(text).await {
        Ok(_) => Ok(()),
        Err(e) => {
            log::debug!("[CLIPBOARD] writeText failed ({:?}), trying execCommand", e);
            legacy_copy(text)
        }
    }
}

fn legacy_copy(text: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let area = document
        .create_element("textarea")
        .map_err(|e| format!("Failed to create textarea: {:?}", e))?
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .map_err(|_| "textarea cast failed".to_string())?;
    area.set_value(text);
    let _ = area.set_attribute("readonly", "");
    let _ = area.style().set_property("position", "fixed");
    let _ = area.style().set_property("opacity", "0");

    body.append_child(&area).map_err(|e| format!("Failed to attach textarea: {:?}", e))?;
    area.select();
    let copied = document
        .dyn_ref::<web_sys::HtmlDocument>()
        .map(|doc| doc.exec_command("copy").unwrap_or(false))
        .unwrap_or(false);
    area.remove();

    if copied {
        Ok(())
    } else {
        Err("copy command refused".to_string())
    }
}
