//! # Domain Types
//!
//! Core domain types used throughout the storefront checkout slice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   CurrentUser   │   │PaymentSelection │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  name           │   │  CashOnDelivery │       │
//! │  │  title          │   │  email          │   │  Gateway        │       │
//! │  │  price (₹)      │   └─────────────────┘   └─────────────────┘       │
//! │  │  thumbnail ...  │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is an external collaborator: `Product` mirrors its read-only
//! listing shape. The cart copies display fields from it at add-time and
//! never looks back (snapshot policy).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Amount;

// =============================================================================
// Product
// =============================================================================

/// A product as listed by the catalog collaborator.
///
/// Consumed read-only by the cart ledger at add-time. Display fields
/// (title, category, thumbnail) are copied onto the cart line when added;
/// a later catalog change does not retroactively change an existing line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier (opaque to the cart).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Unit price in rupees.
    pub price: Amount,

    /// Category slug (e.g., "electronics").
    pub category: String,

    /// Thumbnail image URL.
    pub thumbnail: String,

    /// Average rating (display only).
    pub rating: f64,

    /// Discount percentage already applied to `price` (display only).
    pub discount_percentage: f64,

    /// Brand name.
    pub brand: String,

    /// Units in stock at the catalog.
    pub stock: u32,
}

impl Product {
    /// Builds a minimal product fixture for docs and tests.
    ///
    /// `price` is a decimal rupee string; a malformed price falls back to
    /// zero rather than panicking.
    pub fn sample(id: &str, title: &str, price: &str) -> Self {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            price: Amount::from_rupees_str(price).unwrap_or_default(),
            category: "general".to_string(),
            thumbnail: format!("https://cdn.example.com/{}.jpg", id),
            rating: 4.5,
            discount_percentage: 0.0,
            brand: "Acme".to_string(),
            stock: 50,
        }
    }
}

// =============================================================================
// Current User
// =============================================================================

/// The identity attached to an order, supplied by the external
/// account/session collaborator.
///
/// Checkout consumes exactly this much: a name and email to prefill the
/// gateway's payment modal. Registration, login, and password reset live
/// with the collaborator and are out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,
}

// =============================================================================
// Payment Selection
// =============================================================================

/// How the user chose to pay at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSelection {
    /// Pay the courier on delivery: no gateway involved, the order settles
    /// immediately.
    CashOnDelivery,

    /// Card/UPI through the payment gateway: order creation, gateway modal,
    /// then local signature verification.
    Gateway,
}

impl PaymentSelection {
    /// Returns true if this selection goes through the payment gateway.
    #[inline]
    pub const fn uses_gateway(&self) -> bool {
        matches!(self, PaymentSelection::Gateway)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_product() {
        let product = Product::sample("p-1", "Wireless Headphones", "499");
        assert_eq!(product.id, "p-1");
        assert_eq!(product.price.to_minor_units().unwrap(), 49900);
    }

    #[test]
    fn test_payment_selection() {
        assert!(!PaymentSelection::CashOnDelivery.uses_gateway());
        assert!(PaymentSelection::Gateway.uses_gateway());
    }

    #[test]
    fn test_product_wire_shape() {
        let product = Product::sample("p-1", "Wireless Headphones", "499");
        let json = serde_json::to_value(&product).unwrap();
        // camelCase on the wire, matching the catalog listing
        assert!(json.get("discountPercentage").is_some());
        assert!(json.get("thumbnail").is_some());
    }
}
