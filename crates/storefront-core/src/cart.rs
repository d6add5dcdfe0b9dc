//! # Cart Ledger
//!
//! The ordered collection of (product, quantity) lines with derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Frontend Action          Operation             Ledger Change           │
//! │  ───────────────          ─────────             ─────────────           │
//! │                                                                         │
//! │  Click Product ─────────► add(product) ───────► line qty +1 / append   │
//! │                                                                         │
//! │  Click "-" ─────────────► decrement(id) ──────► qty -1, removes at 1   │
//! │                                                                         │
//! │  Click Remove ──────────► remove(id) ─────────► line removed           │
//! │                                                                         │
//! │  Order confirmed ───────► clear() ────────────► empty ledger           │
//! │                                                                         │
//! │  View Cart ─────────────► total_amount() ─────► derived, never cached  │
//! │                           total_items()                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product increments)
//! - Every line has quantity ≥ 1; decrementing a quantity-1 line removes it,
//!   a zero-quantity line is never persisted
//! - Totals are computed fresh from the line list on every read
//! - Decrement/remove of an absent id is a deterministic no-op, not an error

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Amount;
use crate::types::Product;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart ledger.
///
/// ## Snapshot Policy
/// Display fields and the unit price are copied from the catalog product at
/// add-time and frozen. The ledger does not re-fetch or re-validate product
/// data later: a price change in the catalog does not retroactively change
/// an existing line. Deliberate, not a bug.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Catalog product id (unique within the cart).
    pub product_id: String,

    /// Title at time of adding (frozen).
    pub title: String,

    /// Category at time of adding (frozen).
    pub category: String,

    /// Thumbnail URL at time of adding (frozen).
    pub thumbnail: String,

    /// Unit price in rupees at time of adding (frozen).
    pub unit_price: Amount,

    /// Quantity in cart. Always ≥ 1.
    pub quantity: u32,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line from a catalog product with quantity 1.
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            title: product.title.clone(),
            category: product.category.clone(),
            thumbnail: product.thumbnail.clone(),
            unit_price: product.price,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// The line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Amount {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart ledger.
///
/// One instance per session, injected where needed (never a global).
/// Created empty at session start or rehydrated from the persisted session
/// file; cleared only after an order is confirmed placed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Ordered lines, unique by product id. Kept private so every mutation
    /// goes through the operations below and the invariants hold.
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Read access to the lines, in insertion order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: its quantity increments by 1
    /// - Product not in cart: a new line is appended with quantity 1,
    ///   copying display fields from the product at call time
    ///
    /// ## Errors
    /// - [`CoreError::QuantityTooLarge`] if the increment would exceed
    ///   [`MAX_LINE_QUANTITY`]
    /// - [`CoreError::CartTooLarge`] if a new line would exceed
    ///   [`MAX_CART_LINES`]
    pub fn add(&mut self, product: &Product) -> CoreResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if line.quantity >= MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: line.quantity + 1,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity += 1;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(())
    }

    /// Decrements the quantity of a line by 1.
    ///
    /// ## Behavior
    /// - Quantity > 1: decrement by 1
    /// - Quantity == 1: the line is removed entirely (a line is never
    ///   persisted at quantity 0)
    /// - Id not present: no-op
    ///
    /// Returns `true` if the ledger changed.
    pub fn decrement(&mut self, product_id: &str) -> bool {
        let Some(index) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return false;
        };

        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
        } else {
            self.lines.remove(index);
        }
        true
    }

    /// Removes a line unconditionally, regardless of quantity.
    ///
    /// Returns `true` if a line was removed; an absent id is a no-op.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Empties the ledger.
    ///
    /// Called exactly once per order, after it is confirmed placed
    /// (gateway-verified payment or the cash-on-delivery path). Never
    /// called optimistically before payment confirmation.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total quantity across all lines. Derived on every read.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Total amount = Σ unit_price × quantity. Derived on every read;
    /// there is no stored total that can drift from the line list.
    pub fn total_amount(&self) -> Amount {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Amount::zero(), |acc, t| acc + t)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived totals summary for API responses and UI badges.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: u32,
    pub total_amount: Amount,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_amount: cart.total_amount(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: &str) -> Product {
        Product::sample(id, &format!("Product {}", id), price)
    }

    fn assert_invariants(cart: &Cart) {
        // Totals always equal what the line list derives
        let items: u32 = cart.lines().iter().map(|l| l.quantity).sum();
        let amount = cart
            .lines()
            .iter()
            .map(|l| l.unit_price * l.quantity)
            .fold(Amount::zero(), |acc, t| acc + t);
        assert_eq!(cart.total_items(), items);
        assert_eq!(cart.total_amount(), amount);

        // Every line has quantity >= 1, ids are unique
        for (i, line) in cart.lines().iter().enumerate() {
            assert!(line.quantity >= 1, "line persisted at quantity 0");
            assert!(
                !cart.lines()[..i]
                    .iter()
                    .any(|l| l.product_id == line.product_id),
                "duplicate line for {}",
                line.product_id
            );
        }
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        cart.add(&product("1", "9.99")).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_amount().to_minor_units().unwrap(), 999);
        assert_invariants(&cart);
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut cart = Cart::new();
        let p = product("1", "9.99");

        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        assert_eq!(cart.line_count(), 1); // still one unique line
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_amount().to_minor_units().unwrap(), 1998);
        assert_invariants(&cart);
    }

    #[test]
    fn test_price_is_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut p = product("1", "100");
        cart.add(&p).unwrap();

        // Catalog price change after adding must not touch the line
        p.price = Amount::from_rupees_str("250").unwrap();
        cart.add(&p).unwrap();

        assert_eq!(cart.lines()[0].unit_price.to_minor_units().unwrap(), 10000);
        assert_eq!(cart.total_amount().to_minor_units().unwrap(), 20000);
    }

    #[test]
    fn test_decrement_above_one() {
        let mut cart = Cart::new();
        let p = product("1", "50");
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        assert!(cart.decrement("1"));
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.line_count(), 1);
        assert_invariants(&cart);
    }

    #[test]
    fn test_decrement_at_one_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product("1", "50")).unwrap();

        assert!(cart.decrement("1"));
        assert!(cart.is_empty());
        assert_invariants(&cart);
    }

    #[test]
    fn test_decrement_missing_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("1", "50")).unwrap();

        assert!(!cart.decrement("no-such-id"));
        assert_eq!(cart.total_items(), 1);
        assert_invariants(&cart);
    }

    /// add(p) then decrement(p.id) returns the cart to its prior state;
    /// when the line did not exist before the add, the result is an empty
    /// cart, not an error.
    #[test]
    fn test_add_decrement_roundtrip() {
        let p = product("1", "75.50");

        // Pre-existing line: quantity returns to the prior value
        let mut cart = Cart::new();
        cart.add(&p).unwrap();
        let before = cart.total_items();
        cart.add(&p).unwrap();
        cart.decrement("1");
        assert_eq!(cart.total_items(), before);

        // No pre-existing line: result is an empty cart
        let mut cart = Cart::new();
        cart.add(&p).unwrap();
        cart.decrement("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_regardless_of_quantity() {
        let mut cart = Cart::new();
        let p = product("1", "50");
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        assert!(cart.remove("1"));
        assert!(cart.is_empty());
        assert!(!cart.remove("1")); // second remove is a no-op
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product("1", "10")).unwrap();
        cart.add(&product("2", "20")).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total_amount().is_zero());
    }

    /// Property check: invariants hold after every operation of a mixed
    /// sequence of add/decrement/remove.
    #[test]
    fn test_invariants_across_operation_sequence() {
        let products = [
            product("a", "10.25"),
            product("b", "0.99"),
            product("c", "199"),
        ];

        let mut cart = Cart::new();
        let script: &[(&str, &str)] = &[
            ("add", "a"),
            ("add", "b"),
            ("add", "a"),
            ("dec", "b"),
            ("add", "c"),
            ("dec", "missing"),
            ("dec", "a"),
            ("rem", "c"),
            ("add", "b"),
            ("dec", "a"),
            ("rem", "missing"),
        ];

        for (op, id) in script {
            match *op {
                "add" => {
                    let p = products
                        .iter()
                        .find(|p| p.id == *id)
                        .expect("script uses known products");
                    cart.add(p).unwrap();
                }
                "dec" => {
                    cart.decrement(id);
                }
                "rem" => {
                    cart.remove(id);
                }
                _ => unreachable!(),
            }
            assert_invariants(&cart);
        }
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::new();
        let p = product("1", "10");
        for _ in 0..crate::MAX_LINE_QUANTITY {
            cart.add(&p).unwrap();
        }
        assert!(matches!(
            cart.add(&p),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_line_cap() {
        let mut cart = Cart::new();
        for i in 0..crate::MAX_CART_LINES {
            cart.add(&product(&format!("p{}", i), "1")).unwrap();
        }
        assert!(matches!(
            cart.add(&product("one-too-many", "1")),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        let p = product("1", "499");
        cart.add(&p).unwrap();
        cart.add(&p).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.total_amount.to_minor_units().unwrap(), 99800);
    }
}
