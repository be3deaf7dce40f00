//! Dispatcher
//!
//! The single writer: runs the reducer on a copy of the state, applies the
//! render directive, restores input focus, then starts the effects. Effect
//! results come back in as actions.

use futures::future::join_all;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{self, Action, Ctx, Effect, Pool};
use crate::focus;
use crate::render;
use crate::runtime::runtime;
use crate::store::AppStore;
use crate::web;

pub fn dispatch(store: AppStore, action: Action) {
    let rt = runtime();
    let snapshot = focus::capture();
    log::debug!("[APP] {:?}", action);

    let mut state = store.get_untracked();
    let outcome = {
        let ctx = Ctx {
            catalog: &rt.catalog,
            persist: &rt.persist,
            config: &rt.config,
            now: web::now(),
        };
        actions::update(&mut state, action, &ctx)
    };

    render::apply(&store, state, outcome.render);
    focus::restore_after_paint(snapshot);

    for effect in outcome.effects {
        run(store, effect);
    }
}

fn run(store: AppStore, effect: Effect) {
    let rt = runtime();
    match effect {
        Effect::LoadIndex => spawn_local(async move {
            let result = rt.catalog.load_index().await.map(|_| ());
            dispatch(store, Action::IndexLoaded(result));
        }),
        Effect::LoadPool { ticket, pool } => spawn_local(async move {
            let result = match pool {
                Pool::Category(key) => rt.catalog.load_category(&key).await.map(|_| ()),
                Pool::All => rt.catalog.load_all().await,
            };
            dispatch(store, Action::PoolLoaded { ticket, result });
        }),
        Effect::LoadDetail(id) => spawn_local(async move {
            let result = rt.catalog.get_detail(id).await;
            dispatch(store, Action::DetailLoaded { id, result });
        }),
        Effect::LoadCategories(keys) => spawn_local(async move {
            let results = join_all(keys.iter().map(|key| rt.catalog.load_category(key))).await;
            let result = match results.into_iter().find_map(Result::err) {
                Some(e) => Err(e),
                None => Ok(()),
            };
            dispatch(store, Action::CategoriesLoaded(result));
        }),
        Effect::Debounce(ticket) => spawn_local(async move {
            // timers can fire a hair early relative to Date.now()
            loop {
                let wait = ticket.due_at() - web::now();
                if wait <= 0.0 {
                    break;
                }
                TimeoutFuture::new(wait.ceil() as u32).await;
            }
            dispatch(store, Action::SearchSettle(ticket));
        }),
        Effect::DismissToast { id, after_ms } => spawn_local(async move {
            TimeoutFuture::new(after_ms).await;
            dispatch(store, Action::DismissToast(id));
        }),
        Effect::CopyToClipboard(command) => spawn_local(async move {
            let copied = match web::clipboard::copy_text(&command).await {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("[APP] clipboard unavailable: {}", e);
                    false
                }
            };
            dispatch(store, Action::CopyFinished { command, copied });
        }),
    }
}
