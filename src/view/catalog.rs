//! Catalog grid view model.

use acnhex_core::{Cart, Category, ExpandedEntry, ItemRef, LoadMode, Wishlists};

use crate::actions::display_name;
use crate::store::{Filters, GridSource, GridState, LoadStatus};

/// What sits under the grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Footer {
    LoadMore { remaining: usize },
    Sentinel,
    Loading,
    End,
    Hidden,
}

pub fn footer(grid: &GridState, mode: LoadMode) -> Footer {
    match &grid.status {
        LoadStatus::Loading => Footer::Loading,
        LoadStatus::Failed(_) | LoadStatus::Idle => Footer::Hidden,
        LoadStatus::Ready if grid.entries.is_empty() => Footer::Hidden,
        LoadStatus::Ready => match (grid.remaining(), mode) {
            (0, _) => Footer::End,
            (remaining, LoadMode::Batch) => Footer::LoadMore { remaining },
            (_, LoadMode::Continuous) => Footer::Sentinel,
        },
    }
}

pub fn heading(source: &GridSource, filters: &Filters, categories: &[Category], total: usize) -> String {
    match source {
        GridSource::Discover => "Discover".to_string(),
        GridSource::Category(key) => match categories.iter().find(|c| &c.name == key) {
            Some(c) if !c.emoji.is_empty() => format!("{} {}", c.emoji, c.name),
            _ => key.clone(),
        },
        GridSource::Search => {
            let noun = if total == 1 { "result" } else { "results" };
            if filters.query.is_empty() {
                format!("{} {}", total, noun)
            } else {
                format!("{} {} for \"{}\"", total, noun, filters.query)
            }
        }
    }
}

pub fn empty_message(source: &GridSource) -> &'static str {
    match source {
        GridSource::Search => "No items match your search. Try fewer filters.",
        GridSource::Category(_) => "This category has no items.",
        GridSource::Discover => "Nothing left to discover.",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub key: ItemRef,
    pub title: String,
    pub hex: String,
    pub image: String,
    /// "3 colors" badge for items with several variants
    pub variant_badge: Option<String>,
    pub in_bag: u32,
    pub hearted: bool,
}

pub fn card(entry: &ExpandedEntry, cart: &Cart, wishlists: &Wishlists) -> CardView {
    let key = entry.key();
    CardView {
        key,
        title: display_name(&entry.name, &entry.variant_label),
        hex: entry.hex.clone(),
        image: entry.image.clone(),
        variant_badge: (entry.variant_count > 1).then(|| format!("{} variants", entry.variant_count)),
        in_bag: cart.quantity_of(key),
        hearted: wishlists.in_any_list(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acnhex_core::catalog::expand_item;
    use acnhex_core::{CartAdd, CartEntry};

    use crate::fixture;

    fn grid(shown: usize, total: usize) -> GridState {
        let entries = acnhex_core::catalog::expand(&fixture::items());
        GridState { ticket: 1, entries: entries[..shown].to_vec(), total, status: LoadStatus::Ready }
    }

    #[test]
    fn test_footer_follows_load_mode() {
        assert_eq!(footer(&grid(20, 61), LoadMode::Batch), Footer::LoadMore { remaining: 41 });
        assert_eq!(footer(&grid(20, 61), LoadMode::Continuous), Footer::Sentinel);
        assert_eq!(footer(&grid(61, 61), LoadMode::Batch), Footer::End);

        let mut loading = grid(20, 61);
        loading.status = LoadStatus::Loading;
        assert_eq!(footer(&loading, LoadMode::Continuous), Footer::Loading);
    }

    #[test]
    fn test_card_reflects_bag_and_hearts() {
        let sofa = &fixture::items()[1];
        let red = expand_item(sofa).remove(1);

        let mut cart = Cart::new();
        assert!(matches!(cart.add(CartEntry::from_entry(&red, 1), 2), CartAdd::Added { .. }));
        let mut lists = Wishlists::new();
        lists.toggle(red.key());

        let view = card(&red, &cart, &lists);
        assert_eq!(view.title, "Sofa (Red)");
        assert_eq!(view.in_bag, 2);
        assert!(view.hearted);
        assert_eq!(view.variant_badge.as_deref(), Some("3 variants"));
    }

    #[test]
    fn test_search_heading_counts_results() {
        let filters = Filters { query: "chair".to_string(), ..Filters::default() };
        assert_eq!(heading(&GridSource::Search, &filters, &[], 1), "1 result for \"chair\"");
        let categories = vec![Category { name: "Housewares".to_string(), emoji: "🛋".to_string() }];
        assert_eq!(
            heading(&GridSource::Category("Housewares".to_string()), &filters, &categories, 0),
            "🛋 Housewares"
        );
    }
}
