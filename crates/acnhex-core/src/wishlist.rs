//! Wishlists
//!
//! A set of named lists. The default "Loved Items" list always exists, is
//! always first, cannot be deleted and holds each `(id, variantIdx)` at most
//! once. Other lists may repeat a reference up to their optional cap.

use serde::{Deserialize, Serialize};

use crate::models::ItemRef;

pub const DEFAULT_LIST_ID: &str = "loved";
pub const DEFAULT_LIST_NAME: &str = "Loved Items";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistList {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<usize>,
    #[serde(default)]
    pub items: Vec<ItemRef>,
}

impl WishlistList {
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_LIST_ID
    }

    pub fn contains(&self, item: ItemRef) -> bool {
        self.items.contains(&item)
    }

    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.items.len() >= cap)
    }

    fn default_list(items: Vec<ItemRef>) -> Self {
        Self {
            id: DEFAULT_LIST_ID.to_string(),
            name: DEFAULT_LIST_NAME.to_string(),
            cap: None,
            items,
        }
    }
}

/// Outcome of `Wishlists::add_to_list`
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAdd {
    Added,
    /// Default list toggle took the item back out
    Removed,
    Full,
    NoSuchList,
}

/// Stored documents go through `from_lists`, which restores the default list.
#[derive(Debug, Clone, PartialEq)]
pub struct Wishlists {
    lists: Vec<WishlistList>,
}

impl Default for Wishlists {
    fn default() -> Self {
        Self {
            lists: vec![WishlistList::default_list(Vec::new())],
        }
    }
}

impl Wishlists {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repair stored lists: default list present and first, deduplicated, and
    /// no two lists sharing an id.
    pub fn from_lists(lists: Vec<WishlistList>) -> Self {
        let mut default = WishlistList::default_list(Vec::new());
        let mut others: Vec<WishlistList> = Vec::new();
        for list in lists {
            if list.is_default() {
                default.name = list.name;
                for item in list.items {
                    if !default.items.contains(&item) {
                        default.items.push(item);
                    }
                }
            } else if !others.iter().any(|o| o.id == list.id) {
                others.push(list);
            }
        }
        let mut all = vec![default];
        all.extend(others);
        Self { lists: all }
    }

    pub fn lists(&self) -> &[WishlistList] {
        &self.lists
    }

    pub fn into_lists(self) -> Vec<WishlistList> {
        self.lists
    }

    pub fn list(&self, list_id: &str) -> Option<&WishlistList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn default_list(&self) -> &WishlistList {
        // from_lists/new keep the default list at index 0
        &self.lists[0]
    }

    /// In the default list
    pub fn is_loved(&self, item: ItemRef) -> bool {
        self.default_list().contains(item)
    }

    /// Referenced by any list
    pub fn in_any_list(&self, item: ItemRef) -> bool {
        self.lists.iter().any(|l| l.contains(item))
    }

    /// Toggle membership in the default list. Returns true when now loved.
    pub fn toggle(&mut self, item: ItemRef) -> bool {
        let default = &mut self.lists[0];
        if let Some(pos) = default.items.iter().position(|i| *i == item) {
            default.items.remove(pos);
            false
        } else {
            default.items.push(item);
            true
        }
    }

    pub fn add_to_list(&mut self, list_id: &str, item: ItemRef) -> ListAdd {
        if list_id == DEFAULT_LIST_ID {
            return if self.toggle(item) { ListAdd::Added } else { ListAdd::Removed };
        }
        let Some(list) = self.lists.iter_mut().find(|l| l.id == list_id) else {
            return ListAdd::NoSuchList;
        };
        if list.is_full() {
            return ListAdd::Full;
        }
        list.items.push(item);
        ListAdd::Added
    }

    /// Create a named list and return its id; `None` for a blank name.
    pub fn create_list(&mut self, name: &str, cap: Option<usize>) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let next = self
            .lists
            .iter()
            .filter_map(|l| l.id.strip_prefix("list-").and_then(|n| n.parse::<u32>().ok()))
            .max()
            .map_or(1, |n| n + 1);
        let id = format!("list-{}", next);
        self.lists.push(WishlistList {
            id: id.clone(),
            name: name.to_string(),
            cap: cap.filter(|c| *c > 0),
            items: Vec::new(),
        });
        Some(id)
    }

    pub fn rename_list(&mut self, list_id: &str, name: &str) -> bool {
        let name = name.trim();
        match self.lists.iter_mut().find(|l| l.id == list_id) {
            Some(list) if !name.is_empty() => {
                list.name = name.to_string();
                true
            }
            _ => false,
        }
    }

    /// Delete a named list. The default list is never deleted.
    pub fn delete_list(&mut self, list_id: &str) -> bool {
        if list_id == DEFAULT_LIST_ID {
            return false;
        }
        let before = self.lists.len();
        self.lists.retain(|l| l.id != list_id);
        self.lists.len() != before
    }

    pub fn remove_at(&mut self, list_id: &str, index: usize) -> Option<ItemRef> {
        let list = self.lists.iter_mut().find(|l| l.id == list_id)?;
        (index < list.items.len()).then(|| list.items.remove(index))
    }

    /// Drop every reference to `item` from every list; returns how many went.
    pub fn remove_from_all_lists(&mut self, item: ItemRef) -> usize {
        let mut removed = 0;
        for list in &mut self.lists {
            let before = list.items.len();
            list.items.retain(|i| *i != item);
            removed += before - list.items.len();
        }
        removed
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut lists = Wishlists::new();
        let _ = lists.toggle(ItemRef::new(1, 0));
        let before = lists.clone();

        let item = ItemRef::new(42, 3);
        assert!(lists.toggle(item));
        assert!(lists.is_loved(item));
        assert!(!lists.toggle(item));
        assert_eq!(lists, before);
    }

    #[test]
    fn test_default_list_is_single_instance() {
        let mut lists = Wishlists::new();
        let item = ItemRef::new(5, 0);
        assert_eq!(lists.add_to_list(DEFAULT_LIST_ID, item), ListAdd::Added);
        assert_eq!(lists.add_to_list(DEFAULT_LIST_ID, item), ListAdd::Removed);
        assert!(lists.default_list().items.is_empty());
    }

    #[test]
    fn test_named_list_allows_duplicates_up_to_cap() {
        let mut lists = Wishlists::new();
        let id = lists.create_list("Bedroom", Some(2)).unwrap();
        let item = ItemRef::new(9, 1);
        assert_eq!(lists.add_to_list(&id, item), ListAdd::Added);
        assert_eq!(lists.add_to_list(&id, item), ListAdd::Added);
        assert_eq!(lists.add_to_list(&id, item), ListAdd::Full);
        assert_eq!(lists.list(&id).unwrap().items.len(), 2);
        assert_eq!(lists.add_to_list("list-99", item), ListAdd::NoSuchList);
    }

    #[test]
    fn test_delete_named_list_keeps_default_membership() {
        let mut lists = Wishlists::new();
        let item = ItemRef::new(12, 0);
        let _ = lists.toggle(item);
        let id = lists.create_list("Kitchen", None).unwrap();
        let _ = lists.add_to_list(&id, item);

        assert!(lists.delete_list(&id));
        assert!(lists.list(&id).is_none());
        assert!(lists.is_loved(item));
    }

    #[test]
    fn test_default_list_cannot_be_deleted() {
        let mut lists = Wishlists::new();
        assert!(!lists.delete_list(DEFAULT_LIST_ID));
        assert_eq!(lists.lists().len(), 1);
    }

    #[test]
    fn test_remove_from_all_lists() {
        let mut lists = Wishlists::new();
        let item = ItemRef::new(3, 2);
        let _ = lists.toggle(item);
        let a = lists.create_list("A", None).unwrap();
        let b = lists.create_list("B", None).unwrap();
        let _ = lists.add_to_list(&a, item);
        let _ = lists.add_to_list(&a, item);
        let _ = lists.add_to_list(&b, ItemRef::new(4, 0));

        assert_eq!(lists.remove_from_all_lists(item), 3);
        assert!(!lists.in_any_list(item));
        assert_eq!(lists.list(&b).unwrap().items.len(), 1);
    }

    #[test]
    fn test_create_list_ids_are_unique() {
        let mut lists = Wishlists::new();
        let a = lists.create_list("A", None).unwrap();
        let b = lists.create_list("B", Some(0)).unwrap();
        assert_ne!(a, b);
        assert_eq!(lists.list(&b).unwrap().cap, None);
        assert!(lists.create_list("   ", None).is_none());
    }

    #[test]
    fn test_from_lists_repairs_default() {
        let stored = vec![
            WishlistList { id: "list-1".into(), name: "Garden".into(), cap: None, items: vec![] },
            WishlistList {
                id: DEFAULT_LIST_ID.into(),
                name: DEFAULT_LIST_NAME.into(),
                cap: None,
                items: vec![ItemRef::new(1, 0), ItemRef::new(1, 0)],
            },
        ];
        let lists = Wishlists::from_lists(stored);
        assert!(lists.lists()[0].is_default());
        assert_eq!(lists.default_list().items.len(), 1);
        assert_eq!(lists.lists().len(), 2);
    }
}
