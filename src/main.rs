#![allow(warnings)]
//! ACNHEX Frontend Entry Point

mod actions;
mod app;
mod components;
mod config;
mod dispatch;
mod focus;
mod render;
mod runtime;
mod store;
mod view;
mod web;

#[cfg(test)]
mod fixture;

use std::rc::Rc;

use acnhex_core::Catalog;
use app::App;
use config::Config;
use leptos::prelude::*;
use leptos::task::spawn_local;
use runtime::Runtime;
use web::fetch::HttpSource;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
    }

    let config = Config::from_document();
    let seed = config
        .random_seed
        .unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
    log::info!("[APP] data root {:?}, page size {}", config.data_root, config.page_size);

    let catalog = Catalog::new(Rc::new(HttpSource::new(config.clone())), seed);
    let rt = runtime::install(Runtime {
        config,
        catalog,
        persist: web::local_storage::open(),
    });

    if let Some(script) = rt.config.service_worker.clone().filter(|s| !s.is_empty()) {
        spawn_local(async move { web::service_worker::register(&script).await });
    }

    mount_to_body(App);
}
