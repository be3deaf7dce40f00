//! Static catalog files over HTTP.

use acnhex_core::catalog::LoadFuture;
use acnhex_core::{CatalogIndex, CatalogItem, CatalogSource, LoadError};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::config::Config;

/// `CatalogSource` reading `{data_root}/index.json` and
/// `{data_root}/categories/{slug}.json`
pub struct HttpSource {
    config: Config,
}

impl HttpSource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl CatalogSource for HttpSource {
    fn fetch_index(&self) -> LoadFuture<CatalogIndex> {
        fetch_json(self.config.index_url()).boxed_local()
    }

    fn fetch_category(&self, slug: &str) -> LoadFuture<Vec<CatalogItem>> {
        fetch_json(self.config.category_url(slug)).boxed_local()
    }
}

fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

async fn fetch_json<T: DeserializeOwned>(url: String) -> Result<T, LoadError> {
    let window = web_sys::window().ok_or_else(|| LoadError::Unavailable("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| LoadError::Network { url: url.clone(), message: js_message(&e) })?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|e| LoadError::Network { url: url.clone(), message: js_message(&e) })?;

    if !response.ok() {
        return Err(LoadError::Status { url, status: response.status() });
    }

    let body = response
        .json()
        .map_err(|e| LoadError::Decode { url: url.clone(), message: js_message(&e) })?;
    let value = JsFuture::from(body)
        .await
        .map_err(|e| LoadError::Decode { url: url.clone(), message: js_message(&e) })?;

    log::debug!("[FETCH] {} ok", url);
    serde_wasm_bindgen::from_value(value).map_err(|e| LoadError::Decode { url, message: e.to_string() })
}
