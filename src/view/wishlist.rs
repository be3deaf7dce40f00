//! Wishlist page view model.

use acnhex_core::{ExpandedEntry, ItemRef, Wishlists};

#[derive(Clone, Debug, PartialEq)]
pub struct ListTab {
    pub id: String,
    pub name: String,
    /// "3" or "3/10" for capped lists
    pub count_label: String,
    pub active: bool,
    pub deletable: bool,
}

pub fn tabs(lists: &Wishlists, active: &str) -> Vec<ListTab> {
    lists
        .lists()
        .iter()
        .map(|l| ListTab {
            id: l.id.clone(),
            name: l.name.clone(),
            count_label: match l.cap {
                Some(cap) => format!("{}/{}", l.items.len(), cap),
                None => l.items.len().to_string(),
            },
            active: l.id == active,
            deletable: !l.is_default(),
        })
        .collect()
}

/// One slot of a list; `entry` is `None` until its catalog data is loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct WishCard {
    pub index: usize,
    pub key: ItemRef,
    pub entry: Option<ExpandedEntry>,
}

pub fn cards(lists: &Wishlists, list_id: &str, resolve: impl Fn(ItemRef) -> Option<ExpandedEntry>) -> Vec<WishCard> {
    let Some(list) = lists.list(list_id) else {
        return Vec::new();
    };
    list.items
        .iter()
        .enumerate()
        .map(|(index, key)| WishCard { index, key: *key, entry: resolve(*key) })
        .collect()
}
