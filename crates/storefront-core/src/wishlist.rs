//! # Wishlist Ledger
//!
//! A flat collection of saved products, toggled from product cards.
//!
//! Unlike the cart there are no quantities: a product is either saved or
//! not. Persisted alongside the cart in the session file and rehydrated at
//! session start.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// The wishlist ledger. One instance per session, injected like the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    /// Saved products, unique by id, in insertion order.
    items: Vec<Product>,
}

impl Wishlist {
    /// Creates a new empty wishlist.
    pub fn new() -> Self {
        Wishlist { items: Vec::new() }
    }

    /// Read access to the saved products.
    #[inline]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Toggles a product: saves it if absent, removes it if present.
    ///
    /// Returns `true` if the product is saved after the call.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if let Some(index) = self.items.iter().position(|p| p.id == product.id) {
            self.items.remove(index);
            false
        } else {
            self.items.push(product.clone());
            true
        }
    }

    /// Removes a product by id. An absent id is a no-op.
    ///
    /// Returns `true` if a product was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != product_id);
        self.items.len() != before
    }

    /// Checks whether a product is saved.
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_saves_then_removes() {
        let mut wishlist = Wishlist::new();
        let p = Product::sample("1", "Wireless Headphones", "499");

        assert!(wishlist.toggle(&p));
        assert!(wishlist.contains("1"));
        assert_eq!(wishlist.len(), 1);

        assert!(!wishlist.toggle(&p));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut wishlist = Wishlist::new();
        assert!(!wishlist.remove("no-such-id"));

        let p = Product::sample("1", "Wireless Headphones", "499");
        wishlist.toggle(&p);
        assert!(wishlist.remove("1"));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_no_duplicates() {
        let mut wishlist = Wishlist::new();
        let p = Product::sample("1", "Wireless Headphones", "499");

        wishlist.toggle(&p);
        wishlist.toggle(&p);
        wishlist.toggle(&p);

        // save, remove, save again
        assert_eq!(wishlist.len(), 1);
    }
}
