//! Runtime Configuration
//!
//! Defaults can be overridden by an optional JSON block in the host page:
//! `<script id="acnhex-config" type="application/json">{ "pageSize": 60 }</script>`

use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "acnhex-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory holding `index.json` and `categories/`
    pub data_root: String,
    /// Grid entries per batch
    pub page_size: usize,
    pub search_debounce_ms: u32,
    pub toast_ms: u32,
    /// Fixed seed for random discovery; random per session when absent
    pub random_seed: Option<u64>,
    /// Offline worker script; `None` or empty disables registration
    pub service_worker: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: "data".to_string(),
            page_size: 50,
            search_debounce_ms: 300,
            toast_ms: 2000,
            random_seed: None,
            service_worker: Some("./sw.js".to_string()),
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut config: Config = serde_json::from_str(text).map_err(|e| e.to_string())?;
        config.page_size = config.page_size.max(1);
        config.data_root = config.data_root.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Read the config block from the document, falling back to defaults.
    pub fn from_document() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(text) if !text.trim().is_empty() => match Self::parse(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("[CONFIG] ignoring malformed config block: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    pub fn index_url(&self) -> String {
        format!("{}/index.json", self.data_root)
    }

    pub fn category_url(&self, slug: &str) -> String {
        format!("{}/categories/{}.json", self.data_root, slug)
    }
}
