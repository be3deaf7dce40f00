//! Browser Bindings
//!
//! Thin wrappers over web APIs: storage, fetch, clipboard, the offline
//! worker and the review script.

pub mod clipboard;
pub mod fetch;
pub mod local_storage;
pub mod reviews;
pub mod service_worker;

/// Milliseconds since the epoch, the clock fed to the reducer
pub fn now() -> f64 {
    js_sys::Date::now()
}
