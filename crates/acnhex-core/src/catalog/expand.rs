//! Variant expansion
//!
//! One grid entry per recolor. An entry's tags are the item's non-color tags
//! plus the colors of *its own* variant, so color-filtering never shows a
//! recolor under a color that only a sibling variant has.

use std::collections::BTreeSet;

use crate::catalog::palette;
use crate::models::{CatalogItem, ExpandedEntry, ItemSummary};

pub const PRIMARY_SCOPE: &str = "primary:";
pub const SECONDARY_SCOPE: &str = "secondary:";

fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Item-level tags with every color term removed.
fn item_tags(item: &CatalogItem) -> BTreeSet<String> {
    let item_colors: BTreeSet<String> = item
        .variants
        .iter()
        .flat_map(|v| v.colors())
        .map(normalize)
        .collect();

    let metadata = [&item.style1, &item.style2, &item.hha_set, &item.hha_series]
        .into_iter()
        .filter(|s| !s.is_empty() && s.as_str() != "None")
        .chain(item.themes.iter())
        .chain(item.tags.iter());

    metadata
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .filter(|t| !item_colors.contains(t) && !palette::is_color(t))
        .collect()
}

/// Scoped color tags are filter-only and stay out of the searchable text.
fn finish(tags: BTreeSet<String>) -> (Vec<String>, String) {
    let tags: Vec<String> = tags.into_iter().collect();
    let tag_string = tags
        .iter()
        .filter(|t| !t.starts_with(PRIMARY_SCOPE) && !t.starts_with(SECONDARY_SCOPE))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    (tags, tag_string)
}

pub fn expand_item(item: &CatalogItem) -> Vec<ExpandedEntry> {
    let base = item_tags(item);
    let count = item.variants.len();

    item.variants
        .iter()
        .enumerate()
        .map(|(idx, variant)| {
            let mut tags = base.clone();
            let color1 = normalize(&variant.color1);
            let color2 = normalize(&variant.color2);
            for (scope, color) in [(PRIMARY_SCOPE, &color1), (SECONDARY_SCOPE, &color2)] {
                if !color.is_empty() && color != "none" {
                    tags.insert(color.clone());
                    tags.insert(format!("{}{}", scope, color));
                }
            }
            let (tags, tag_string) = finish(tags);

            ExpandedEntry {
                id: item.id,
                variant_idx: idx,
                name: item.name.clone(),
                variant_label: variant.label().to_string(),
                category: item.category.clone(),
                hex: variant.order_hex().to_string(),
                image: variant.image.clone(),
                variant_count: count,
                tags,
                tag_string,
            }
        })
        .collect()
}

pub fn expand(items: &[CatalogItem]) -> Vec<ExpandedEntry> {
    items.iter().flat_map(expand_item).collect()
}

/// Grid row for an unexpanded index summary; stands for the primary variant.
pub fn from_summary(summary: &ItemSummary) -> ExpandedEntry {
    let (tags, tag_string) = finish(summary.tags.iter().map(|t| normalize(t)).filter(|t| !t.is_empty()).collect());
    let label = if summary.primary_variant_label.is_empty() || summary.primary_variant_label == "NA" {
        "Default".to_string()
    } else {
        summary.primary_variant_label.clone()
    };
    ExpandedEntry {
        id: summary.id,
        variant_idx: 0,
        name: summary.name.clone(),
        variant_label: label,
        category: summary.category.clone(),
        hex: summary.hex.clone(),
        image: summary.image.clone(),
        variant_count: 1,
        tags,
        tag_string,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variant;

    fn variant(name: &str, c1: &str, c2: &str, hex: &str) -> Variant {
        Variant {
            name: name.to_string(),
            color1: c1.to_string(),
            color2: c2.to_string(),
            hex: "0A3F".to_string(),
            variated_hex: hex.to_string(),
            image: format!("{}.png", name),
        }
    }

    fn sofa() -> CatalogItem {
        CatalogItem {
            id: 11,
            name: "Sofa".to_string(),
            category: "Housewares".to_string(),
            // index-style tags carry every variant's colors
            tags: vec!["Blue".into(), "Red".into(), "Green".into(), "Living Room".into()],
            variants: vec![
                variant("Blue", "Blue", "White", "0A3F0001"),
                variant("Red", "Red", "", "0A3F0002"),
                variant("Green", "Green", "Green", "0A3F0003"),
            ],
            size: "2x1".into(),
            catalog: "For sale".into(),
            style1: "Simple".into(),
            style2: "None".into(),
            hha_concept1: String::new(),
            hha_concept2: String::new(),
            hha_set: String::new(),
            hha_series: String::new(),
            themes: vec![],
            diy: false,
        }
    }

    #[test]
    fn test_each_variant_carries_only_its_own_colors() {
        let item = sofa();
        let entries = expand_item(&item);
        assert_eq!(entries.len(), 3);

        for (entry, variant) in entries.iter().zip(&item.variants) {
            let own: BTreeSet<String> = variant.colors().map(normalize).collect();
            let colors: BTreeSet<String> = entry
                .tags
                .iter()
                .filter(|t| palette::is_color(t))
                .cloned()
                .collect();
            assert_eq!(colors, own, "variant {}", variant.name);
        }
        assert!(entries[0].has_tag("primary:blue"));
        assert!(entries[0].has_tag("secondary:white"));
        assert!(!entries[1].has_tag("blue"));
        assert!(entries[1].has_tag("living room"));
        assert!(entries[1].has_tag("simple"));
        assert!(!entries[1].has_tag("none"));
    }

    #[test]
    fn test_entries_point_back_to_their_variant() {
        let item = sofa();
        for entry in expand_item(&item) {
            let variant = item.variant(entry.variant_idx).unwrap();
            assert_eq!(entry.id, item.id);
            assert_eq!(entry.hex, variant.order_hex());
            assert_eq!(entry.variant_count, 3);
        }
    }

    #[test]
    fn test_scoped_tags_are_not_searchable_text() {
        let entries = expand_item(&sofa());
        assert!(entries[0].has_tag("primary:blue"));
        assert!(!entries[0].tag_string.contains("primary"));
        assert!(!entries[0].tag_string.contains("secondary"));
        assert!(entries[0].tag_string.contains("blue"));
        assert!(entries.iter().all(|e| !crate::catalog::query::matches(e, "primary", &BTreeSet::new())));
    }
}
