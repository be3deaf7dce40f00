//! Cart page view model.

use acnhex_core::{generate_command, Cart, CART_CAPACITY};

#[derive(Clone, Debug, PartialEq)]
pub struct CartSummary {
    /// "12 / 40 items"
    pub count_label: String,
    pub command: String,
    pub is_full: bool,
    pub is_empty: bool,
}

pub fn summary(cart: &Cart, prefix: &str) -> CartSummary {
    CartSummary {
        count_label: format!("{} / {} items", cart.total(), CART_CAPACITY),
        command: generate_command(prefix, cart.entries()),
        is_full: cart.is_full(),
        is_empty: cart.is_empty(),
    }
}

/// Text on the header bag badge; hidden when empty
pub fn badge(cart: &Cart) -> Option<String> {
    (!cart.is_empty()).then(|| cart.total().to_string())
}
