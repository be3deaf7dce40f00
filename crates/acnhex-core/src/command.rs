//! Bot Order Command
//!
//! `{prefix}order {hex}, {hex}, ...` with every cart line repeated by its
//! quantity, in cart order.

use crate::models::{CartEntry, DEFAULT_PREFIX};

/// Reduce user or stored input to the bare prefix. A trailing `order` is
/// dropped since the command adds it; blank input falls back to the default.
pub fn normalize_prefix(text: &str) -> String {
    let text = text.trim();
    let bare = match text.len().checked_sub("order".len()) {
        Some(cut) if text.is_char_boundary(cut) && text[cut..].eq_ignore_ascii_case("order") => text[..cut].trim_end(),
        _ => text,
    };
    if bare.is_empty() {
        DEFAULT_PREFIX.to_string()
    } else {
        bare.to_string()
    }
}

pub fn generate_command(prefix: &str, entries: &[CartEntry]) -> String {
    let hexes: Vec<&str> = entries
        .iter()
        .flat_map(|e| std::iter::repeat(e.hex.as_str()).take(e.qty as usize))
        .collect();

    if hexes.is_empty() {
        format!("{}order", prefix)
    } else {
        format!("{}order {}", prefix, hexes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(hex: &str, qty: u32) -> CartEntry {
        CartEntry {
            id: 1,
            variant_idx: 0,
            name: "Item".to_string(),
            variant_label: String::new(),
            hex: hex.to_string(),
            image: String::new(),
            qty,
        }
    }

    #[test]
    fn test_quantities_repeat_hex_in_cart_order() {
        let cart = vec![line("0A3F", 2), line("1B2C", 1)];
        assert_eq!(generate_command("!", &cart), "!order 0A3F, 0A3F, 1B2C");
    }

    #[test]
    fn test_custom_prefix_and_empty_cart() {
        assert_eq!(generate_command("*", &[line("00FF", 1)]), "*order 00FF");
        assert_eq!(generate_command("!", &[]), "!order");
    }

    #[test]
    fn test_prefix_drops_trailing_order() {
        assert_eq!(normalize_prefix("*order"), "*");
        assert_eq!(normalize_prefix(" $ ORDER "), "$");
        assert_eq!(normalize_prefix("order"), DEFAULT_PREFIX);
        assert_eq!(normalize_prefix("   "), DEFAULT_PREFIX);
        assert_eq!(normalize_prefix("?"), "?");
        assert_eq!(generate_command(&normalize_prefix("*order"), &[line("0A3F", 1)]), "*order 0A3F");
    }
}
