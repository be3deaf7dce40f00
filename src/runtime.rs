//! Session Services
//!
//! Non-reactive services shared by the dispatcher and components: the
//! catalog cache, the persistent store and the configuration. Installed
//! once in `main` before mounting.

use std::cell::OnceCell;
use std::rc::Rc;

use acnhex_core::{Catalog, Persist};

use crate::config::Config;

pub struct Runtime {
    pub config: Config,
    pub catalog: Catalog,
    pub persist: Persist,
}

thread_local! {
    static RUNTIME: OnceCell<Rc<Runtime>> = const { OnceCell::new() };
}

pub fn install(runtime: Runtime) -> Rc<Runtime> {
    RUNTIME.with(|cell| cell.get_or_init(|| Rc::new(runtime)).clone())
}

/// Get the session services
pub fn runtime() -> Rc<Runtime> {
    RUNTIME
        .with(|cell| cell.get().cloned())
        .expect("runtime should be installed before mount")
}
