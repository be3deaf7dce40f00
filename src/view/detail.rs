//! Detail page view model.

use acnhex_core::{Cart, CatalogItem};

#[derive(Clone, Debug, PartialEq)]
pub struct Swatch {
    pub idx: usize,
    pub label: String,
    pub image: String,
    pub selected: bool,
}

pub fn swatches(item: &CatalogItem, selected: usize) -> Vec<Swatch> {
    item.variants
        .iter()
        .enumerate()
        .map(|(idx, v)| Swatch {
            idx,
            label: v.label().to_string(),
            image: v.image.clone(),
            selected: idx == selected,
        })
        .collect()
}

fn present(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != "None" && value != "NA").then(|| value.to_string())
}

/// Label/value rows under the picture; empty fields are skipped.
pub fn info_rows(item: &CatalogItem, variant_idx: usize) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    if item.variants.len() > 1 {
        if let Some(v) = item.variant(variant_idx) {
            rows.push(("Variation", v.label().to_string()));
        }
    }
    let hex = item.variant(variant_idx).map(|v| v.order_hex().to_string()).unwrap_or_default();
    rows.extend(present(&hex).map(|h| ("Hex ID", h)));
    rows.extend(present(&item.size).map(|s| ("Size", s)));
    rows.extend(present(&item.catalog).map(|c| ("Catalogue", c)));

    let styles: Vec<String> = [&item.style1, &item.style2].into_iter().filter_map(|s| present(s)).collect();
    if !styles.is_empty() {
        rows.push(("Style", styles.join(", ")));
    }
    let concepts: Vec<String> =
        [&item.hha_concept1, &item.hha_concept2].into_iter().filter_map(|s| present(s)).collect();
    if !concepts.is_empty() {
        rows.push(("HHA Concepts", concepts.join(", ")));
    }
    rows.extend(present(&item.hha_set).map(|s| ("HHA Set", s)));
    rows.extend(present(&item.hha_series).map(|s| ("HHA Series", s)));
    if !item.themes.is_empty() {
        rows.push(("Themes", item.themes.join(", ")));
    }
    if item.diy {
        rows.push(("DIY", "Yes".to_string()));
    }
    rows
}

pub fn add_label(qty: u32, cart: &Cart) -> String {
    if cart.is_full() {
        "Bag is full".to_string()
    } else if qty > 1 {
        format!("Add {} to Bag", qty)
    } else {
        "Add to Bag".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn test_info_rows_skip_empty_fields() {
        let sofa = fixture::items().remove(1);
        let rows = info_rows(&sofa, 1);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Variation", "Hex ID", "Size", "Catalogue", "Style", "HHA Concepts"]);
        assert_eq!(rows[0].1, "Red");
        assert_eq!(rows[1].1, "1001");
    }

    #[test]
    fn test_single_variant_has_no_variation_row() {
        let lamp = fixture::items().remove(2);
        assert!(info_rows(&lamp, 0).iter().all(|(l, _)| *l != "Variation"));
        assert_eq!(swatches(&lamp, 0)[0].label, "Default");
    }
}
