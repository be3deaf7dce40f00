//! Small in-memory catalog shared by reducer and view tests.

use std::collections::HashMap;
use std::rc::Rc;

use acnhex_core::catalog::LoadFuture;
use acnhex_core::{Catalog, CatalogIndex, CatalogItem, CatalogSource, Category, ItemSummary, Variant};
use futures::executor::block_on;
use futures::FutureExt;

pub struct FixtureSource {
    index: CatalogIndex,
    categories: HashMap<String, Vec<CatalogItem>>,
}

impl CatalogSource for FixtureSource {
    fn fetch_index(&self) -> LoadFuture<CatalogIndex> {
        let index = self.index.clone();
        async move { Ok(index) }.boxed_local()
    }

    fn fetch_category(&self, slug: &str) -> LoadFuture<Vec<CatalogItem>> {
        let items = self.categories.get(slug).cloned().unwrap_or_default();
        async move { Ok(items) }.boxed_local()
    }
}

pub fn variant(name: &str, color1: &str, hex: &str) -> Variant {
    Variant {
        name: name.to_string(),
        color1: color1.to_string(),
        color2: String::new(),
        hex: hex.to_string(),
        variated_hex: String::new(),
        image: format!("{}.png", hex),
    }
}

pub fn item(id: u32, name: &str, category: &str, variants: Vec<Variant>) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        category: category.to_string(),
        tags: vec![],
        variants,
        size: "1x1".to_string(),
        catalog: "For sale".to_string(),
        style1: "Simple".to_string(),
        style2: String::new(),
        hha_concept1: "living room".to_string(),
        hha_concept2: String::new(),
        hha_set: String::new(),
        hha_series: String::new(),
        themes: vec![],
        diy: false,
    }
}

/// Housewares: Blue Chair (1 variant), Sofa (Blue/Red/Green).
/// Miscellaneous: Lamp (Yellow), plus 60 numbered Plushies for paging.
pub fn items() -> Vec<CatalogItem> {
    let mut items = vec![
        item(1, "Blue Chair", "Housewares", vec![variant("Blue", "Blue", "0A3F")]),
        item(
            2,
            "Sofa",
            "Housewares",
            vec![variant("Blue", "Blue", "1000"), variant("Red", "Red", "1001"), variant("Green", "Green", "1002")],
        ),
        item(3, "Lamp", "Miscellaneous", vec![variant("NA", "Yellow", "1B2C")]),
    ];
    for n in 0..60 {
        items.push(item(100 + n, &format!("Plushie {}", n), "Miscellaneous", vec![variant("NA", "Pink", &format!("2{:03X}", n))]));
    }
    items
}

pub fn source() -> FixtureSource {
    let items = items();
    let summaries = items
        .iter()
        .map(|i| ItemSummary {
            id: i.id,
            category: i.category.clone(),
            name: i.name.clone(),
            primary_variant_label: i.variants[0].name.clone(),
            hex: i.variants[0].hex.clone(),
            image: i.variants[0].image.clone(),
            tags: vec!["simple".to_string()],
        })
        .collect();
    let mut categories: HashMap<String, Vec<CatalogItem>> = HashMap::new();
    for i in items {
        categories.entry(acnhex_core::catalog::slug(&i.category)).or_default().push(i);
    }
    FixtureSource {
        index: CatalogIndex {
            categories: vec![
                Category { name: "Housewares".to_string(), emoji: "🛋".to_string() },
                Category { name: "Miscellaneous".to_string(), emoji: "🧸".to_string() },
            ],
            items: summaries,
        },
        categories,
    }
}

/// Catalog with only the index loaded
pub fn catalog() -> Catalog {
    let catalog = Catalog::new(Rc::new(source()), 7);
    block_on(catalog.load_index()).unwrap();
    catalog
}

/// Catalog with every category loaded
pub fn loaded_catalog() -> Catalog {
    let catalog = catalog();
    block_on(catalog.load_all()).unwrap();
    catalog
}
