//! Pagination and search over grid entries.

use std::collections::BTreeSet;

use crate::models::ExpandedEntry;

/// One window of a longer list
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total: usize,
}

impl<T> Page<'_, T> {
    /// Entries still left after this window, given the window's offset.
    pub fn remaining_after(&self, offset: usize) -> usize {
        self.total.saturating_sub(offset + self.items.len())
    }
}

/// Stable window `[offset, offset + limit)`, clipped to the list.
pub fn paginate<T>(items: &[T], offset: usize, limit: usize) -> Page<'_, T> {
    let start = offset.min(items.len());
    let end = offset.saturating_add(limit).min(items.len());
    Page { items: &items[start..end], total: items.len() }
}

/// Whether the user has asked for anything at all. Search is opt-in: an
/// empty query with no tags is not "everything".
pub fn is_active(query: &str, tags: &BTreeSet<String>) -> bool {
    !query.trim().is_empty() || !tags.is_empty()
}

pub fn matches(entry: &ExpandedEntry, query: &str, tags: &BTreeSet<String>) -> bool {
    let query = query.trim().to_lowercase();
    let text_ok = query.is_empty()
        || entry.name.to_lowercase().contains(&query)
        || entry.hex.to_lowercase().contains(&query)
        || entry.tag_string.contains(&query);
    text_ok && tags.iter().all(|tag| entry.has_tag(tag))
}

/// All matching entries, in pool order.
pub fn filter<'a>(pool: &'a [ExpandedEntry], query: &str, tags: &BTreeSet<String>) -> Vec<&'a ExpandedEntry> {
    if !is_active(query, tags) {
        return Vec::new();
    }
    pool.iter().filter(|e| matches(e, query, tags)).collect()
}

/// Matching entries for one page, with the overall match count.
pub fn search(
    pool: &[ExpandedEntry],
    query: &str,
    tags: &BTreeSet<String>,
    offset: usize,
    limit: usize,
) -> (Vec<ExpandedEntry>, usize) {
    let hits = filter(pool, query, tags);
    let page = paginate(&hits, offset, limit);
    (page.items.iter().map(|e| (*e).clone()).collect(), page.total)
}
