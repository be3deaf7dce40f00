//! Shopping Cart
//!
//! Find-or-increment cart: one line per `(id, variantIdx)` with a quantity.
//! The 40-slot cap is checked against the summed quantity on every path that
//! can grow the cart.

use crate::models::{CartEntry, ItemRef};

/// Maximum number of units a single bot order can carry
pub const CART_CAPACITY: u32 = 40;

/// Result of any operation that may grow the cart
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAdd {
    /// The line now holds `line_qty` units
    Added { line_qty: u32 },
    /// Nothing changed; only `available` more units fit
    Refused { available: u32 },
}

impl CartAdd {
    pub fn is_added(&self) -> bool {
        matches!(self, CartAdd::Added { .. })
    }
}

/// Built only through `from_entries` and the mutators, so the cap always holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines, folding duplicates and dropping units
    /// past the cap.
    pub fn from_entries(entries: impl IntoIterator<Item = CartEntry>) -> Self {
        let mut cart = Cart::new();
        for entry in entries {
            if entry.qty == 0 {
                continue;
            }
            let fit = entry.qty.min(cart.available());
            if fit == 0 {
                log::warn!("[CART] dropping {} stored units of {} past the cap", entry.qty, entry.name);
                continue;
            }
            let _ = cart.add(CartEntry { qty: fit, ..entry }, fit);
        }
        cart
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units across all lines
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.qty).sum()
    }

    pub fn available(&self) -> u32 {
        CART_CAPACITY.saturating_sub(self.total())
    }

    pub fn is_full(&self) -> bool {
        self.total() >= CART_CAPACITY
    }

    pub fn quantity_of(&self, key: ItemRef) -> u32 {
        self.line(key).map(|e| e.qty).unwrap_or(0)
    }

    pub fn line(&self, key: ItemRef) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    /// Add `qty` units of `snapshot`'s item. All-or-nothing: refused when the
    /// cart cannot take every unit.
    pub fn add(&mut self, snapshot: CartEntry, qty: u32) -> CartAdd {
        let available = self.available();
        if qty == 0 || qty > available {
            return CartAdd::Refused { available };
        }
        let key = snapshot.key();
        if let Some(line) = self.entries.iter_mut().find(|e| e.key() == key) {
            line.qty += qty;
            return CartAdd::Added { line_qty: line.qty };
        }
        self.entries.push(CartEntry { qty, ..snapshot });
        CartAdd::Added { line_qty: qty }
    }

    /// One more unit of an existing line
    pub fn increment(&mut self, key: ItemRef) -> CartAdd {
        let available = self.available();
        match self.entries.iter_mut().find(|e| e.key() == key) {
            Some(line) if available > 0 => {
                line.qty += 1;
                CartAdd::Added { line_qty: line.qty }
            }
            _ => CartAdd::Refused { available },
        }
    }

    /// One unit fewer; returns the remaining quantity (0 means the line is gone)
    pub fn decrement(&mut self, key: ItemRef) -> Option<u32> {
        let pos = self.entries.iter().position(|e| e.key() == key)?;
        let line = &mut self.entries[pos];
        line.qty = line.qty.saturating_sub(1);
        if line.qty == 0 {
            self.entries.remove(pos);
            return Some(0);
        }
        Some(line.qty)
    }

    pub fn remove(&mut self, key: ItemRef) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key() != key);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, variant_idx: usize, hex: &str) -> CartEntry {
        CartEntry {
            id,
            variant_idx,
            name: format!("Item {}", id),
            variant_label: "Default".to_string(),
            hex: hex.to_string(),
            image: String::new(),
            qty: 1,
        }
    }

    #[test]
    fn test_forty_first_unit_is_refused() {
        let mut cart = Cart::new();
        for i in 0..CART_CAPACITY {
            // alternate between a repeated line and fresh lines
            let id = if i % 2 == 0 { 1 } else { 100 + i };
            assert!(cart.add(entry(id, 0, "0A3F"), 1).is_added());
        }
        assert_eq!(cart.total(), 40);
        assert_eq!(cart.add(entry(999, 0, "FFFF"), 1), CartAdd::Refused { available: 0 });
        assert_eq!(cart.increment(ItemRef::new(1, 0)), CartAdd::Refused { available: 0 });
        assert_eq!(cart.total(), 40);
    }

    #[test]
    fn test_same_variant_increments_existing_line() {
        let mut cart = Cart::new();
        let _ = cart.add(entry(7, 2, "0A3F"), 2);
        assert_eq!(cart.add(entry(7, 2, "0A3F"), 3), CartAdd::Added { line_qty: 5 });
        assert_eq!(cart.entries().len(), 1);

        let _ = cart.add(entry(7, 1, "0A40"), 1);
        assert_eq!(cart.entries().len(), 2);
    }

    #[test]
    fn test_multi_unit_add_is_all_or_nothing() {
        let mut cart = Cart::new();
        let _ = cart.add(entry(1, 0, "AAAA"), 38);
        assert_eq!(cart.add(entry(2, 0, "BBBB"), 3), CartAdd::Refused { available: 2 });
        assert_eq!(cart.total(), 38);
        assert!(cart.add(entry(2, 0, "BBBB"), 2).is_added());
        assert!(cart.is_full());
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        let key = ItemRef::new(3, 0);
        let _ = cart.add(entry(3, 0, "0C0C"), 2);
        assert_eq!(cart.decrement(key), Some(1));
        assert_eq!(cart.decrement(key), Some(0));
        assert!(cart.is_empty());
        assert_eq!(cart.decrement(key), None);
    }

    #[test]
    fn test_from_entries_folds_duplicates_and_clamps() {
        let mut big = entry(1, 0, "AAAA");
        big.qty = 30;
        let mut dup = entry(1, 0, "AAAA");
        dup.qty = 5;
        let mut overflow = entry(2, 0, "BBBB");
        overflow.qty = 10;

        let cart = Cart::from_entries(vec![big, dup, overflow]);
        assert_eq!(cart.quantity_of(ItemRef::new(1, 0)), 35);
        assert_eq!(cart.quantity_of(ItemRef::new(2, 0)), 5);
        assert_eq!(cart.total(), CART_CAPACITY);
    }
}
