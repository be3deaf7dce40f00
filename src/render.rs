//! Render Directives
//!
//! The reducer says how much of the store changed. A full render replaces
//! the whole state; a patch writes the new state silently and then notifies
//! only the named fields, so components reading other fields stay put.

use leptos::prelude::*;

use crate::store::{AppState, AppStateStoreFields, AppStore};

/// Named surgical updates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Patch {
    DetailVariant,
    DetailQuantity,
    CartLine,
    CartBadge,
    Hearts,
    SearchDraft,
    SearchResults,
    FilterPanel,
    Grid,
    Toast,
    Modal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Render {
    Full,
    Patch(Vec<Patch>),
    #[default]
    None,
}

impl Render {
    /// Combine two directives; a full render absorbs everything.
    pub fn and(self, other: Render) -> Render {
        match (self, other) {
            (Render::Full, _) | (_, Render::Full) => Render::Full,
            (Render::None, r) | (r, Render::None) => r,
            (Render::Patch(mut a), Render::Patch(b)) => {
                for p in b {
                    if !a.contains(&p) {
                        a.push(p);
                    }
                }
                Render::Patch(a)
            }
        }
    }

    pub fn patch(p: Patch) -> Render {
        Render::Patch(vec![p])
    }
}

impl Patch {
    fn notify(self, store: &AppStore, state: &AppState) {
        match self {
            Patch::DetailVariant | Patch::DetailQuantity => store.detail().set(state.detail.clone()),
            Patch::CartLine | Patch::CartBadge => store.cart().set(state.cart.clone()),
            Patch::Hearts => store.wishlists().set(state.wishlists.clone()),
            Patch::SearchDraft => store.filters().set(state.filters.clone()),
            Patch::SearchResults => {
                store.filters().set(state.filters.clone());
                store.grid().set(state.grid.clone());
            }
            Patch::FilterPanel => {
                store.filters().set(state.filters.clone());
                store.ui().set(state.ui.clone());
            }
            Patch::Grid => store.grid().set(state.grid.clone()),
            Patch::Toast | Patch::Modal => store.ui().set(state.ui.clone()),
        }
    }
}

/// Write `state` into the store as directed.
pub fn apply(store: &AppStore, state: AppState, render: Render) {
    match render {
        Render::Full => store.set(state),
        Render::None => *store.write_untracked() = state,
        Render::Patch(patches) => {
            *store.write_untracked() = state.clone();
            for patch in patches {
                patch.notify(store, &state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_absorbs_patches() {
        let r = Render::patch(Patch::CartBadge).and(Render::Full);
        assert_eq!(r, Render::Full);
    }

    #[test]
    fn test_patches_merge_without_duplicates() {
        let r = Render::patch(Patch::CartBadge)
            .and(Render::None)
            .and(Render::Patch(vec![Patch::Toast, Patch::CartBadge]));
        assert_eq!(r, Render::Patch(vec![Patch::CartBadge, Patch::Toast]));
    }
}
