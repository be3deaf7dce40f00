//! Filter panel view model: color chips with scope, tag finder, active chips.

use std::collections::BTreeSet;

use acnhex_core::catalog::expand::{PRIMARY_SCOPE, SECONDARY_SCOPE};
use acnhex_core::catalog::palette::COLORS;

use crate::store::ColorScope;

pub fn scoped_tag(color: &str, scope: ColorScope) -> String {
    match scope {
        ColorScope::Any => color.to_string(),
        ColorScope::Primary => format!("{}{}", PRIMARY_SCOPE, color),
        ColorScope::Secondary => format!("{}{}", SECONDARY_SCOPE, color),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorChip {
    pub color: &'static str,
    /// Filter tag toggled by this chip in the current scope
    pub tag: String,
    pub swatch: &'static str,
    pub active: bool,
}

pub fn color_chips(selected: &BTreeSet<String>, scope: ColorScope) -> Vec<ColorChip> {
    COLORS
        .iter()
        .map(|&(color, swatch)| {
            let tag = scoped_tag(color, scope);
            ColorChip { color, active: selected.contains(&tag), tag, swatch }
        })
        .collect()
}

/// Simple fuzzy match: check if query chars appear in order in the target
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let mut target_chars = target.chars();
    for query_char in query.chars() {
        loop {
            match target_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

/// Unselected vocabulary tags matching `query`; prefix matches first.
pub fn tag_suggestions(vocabulary: &[String], query: &str, selected: &BTreeSet<String>, limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<&String> = vocabulary
        .iter()
        .filter(|t| !selected.contains(*t) && fuzzy_match(&query, t))
        .collect();
    hits.sort_by_key(|t| !t.starts_with(&query));
    hits.into_iter().take(limit).cloned().collect()
}

/// "primary:blue" -> "Blue (main)"
pub fn tag_label(tag: &str) -> String {
    let (name, scope) = if let Some(c) = tag.strip_prefix(PRIMARY_SCOPE) {
        (c, Some("main"))
    } else if let Some(c) = tag.strip_prefix(SECONDARY_SCOPE) {
        (c, Some("accent"))
    } else {
        (tag, None)
    };
    let mut chars = name.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    match scope {
        Some(scope) => format!("{} ({})", title, scope),
        None => title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_chips_follow_scope() {
        let selected = set(&["primary:blue"]);
        let any = color_chips(&selected, ColorScope::Any);
        assert!(any.iter().all(|c| !c.active));

        let primary = color_chips(&selected, ColorScope::Primary);
        let blue = primary.iter().find(|c| c.color == "blue").unwrap();
        assert!(blue.active);
        assert_eq!(blue.tag, "primary:blue");
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("lvrm", "living room"));
        assert!(!fuzzy_match("xyz", "living room"));
    }

    #[test]
    fn test_suggestions_prefer_prefix_and_skip_selected() {
        let vocab: Vec<String> = ["cute", "elegant", "cool", "culture"].iter().map(|s| s.to_string()).collect();
        let hits = tag_suggestions(&vocab, "cu", &set(&["cute"]), 5);
        assert_eq!(hits, vec!["culture".to_string()]);

        let hits = tag_suggestions(&vocab, "e", &BTreeSet::new(), 5);
        assert_eq!(hits[0], "elegant");
        assert!(tag_suggestions(&vocab, "  ", &BTreeSet::new(), 5).is_empty());
    }

    #[test]
    fn test_tag_labels() {
        assert_eq!(tag_label("primary:blue"), "Blue (main)");
        assert_eq!(tag_label("secondary:red"), "Red (accent)");
        assert_eq!(tag_label("living room"), "Living room");
    }
}
