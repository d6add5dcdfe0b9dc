//! # Order Intent Builder
//!
//! Converts the cart ledger's total into a gateway order-creation request.
//!
//! ## Flow Position
//! ```text
//! Cart.total_amount()  (₹, decimal)
//!        │
//!        ▼  guard: non-empty cart, positive total  ← THIS MODULE
//! OrderIntent { amount_minor (paise), currency, receipt_id }
//!        │
//!        ▼
//! PaymentGateway::create_order(intent)   (storefront-checkout)
//! ```
//!
//! The empty-cart guard here is the one explicit precondition of the whole
//! checkout slice: a zero or empty cart must be rejected before any
//! gateway call is made.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Amount;
use crate::DEFAULT_CURRENCY;

// =============================================================================
// Order Intent
// =============================================================================

/// A locally constructed charge request, sent to the payment gateway to
/// obtain a gateway order id.
///
/// Created immediately before the order-creation call; never mutated;
/// discarded once the corresponding verification resolves.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderIntent {
    /// Amount in the gateway's minor unit (paise). Always positive.
    pub amount_minor: i64,

    /// ISO currency code. Defaults to [`DEFAULT_CURRENCY`].
    pub currency: String,

    /// Unique receipt id, one per intent.
    pub receipt_id: String,

    /// When the intent was built.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderIntent {
    /// Builds an intent from the current cart, in the default currency.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] if the cart has no lines — rejected here,
    ///   before any network call
    /// - [`CoreError::InvalidAmount`] if the total is not positive
    pub fn from_cart(cart: &Cart) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        Self::from_amount(cart.total_amount(), None)
    }

    /// Builds an intent from an explicit rupee amount.
    ///
    /// Used by the wire `/create-order` path, where the client sends the
    /// rupee total directly. The amount is converted to minor units by
    /// multiplying by 100 and rounding half away from zero — rounding, not
    /// truncation, so fractional amounts never undercharge.
    pub fn from_amount(amount: Amount, currency: Option<&str>) -> CoreResult<Self> {
        if !amount.is_positive() {
            return Err(CoreError::InvalidAmount {
                reason: format!("total must be positive, got {}", amount),
            });
        }

        Ok(OrderIntent {
            amount_minor: amount.to_minor_units()?,
            currency: currency.unwrap_or(DEFAULT_CURRENCY).to_string(),
            receipt_id: generate_receipt_id(),
            created_at: Utc::now(),
        })
    }
}

/// Generates a receipt id unique per intent.
///
/// Timestamp millis plus a short random suffix: collisions are practically
/// impossible at the expected request volume, and the timestamp keeps
/// receipts greppable in gateway dashboards.
fn generate_receipt_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let entropy = Uuid::new_v4().simple().to_string();
    format!("receipt_{}_{}", millis, &entropy[..8])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    #[test]
    fn test_intent_from_cart() {
        let mut cart = Cart::new();
        cart.add(&Product::sample("1", "Wireless Headphones", "499"))
            .unwrap();

        let intent = OrderIntent::from_cart(&cart).unwrap();
        assert_eq!(intent.amount_minor, 49900);
        assert_eq!(intent.currency, "INR");
        assert!(intent.receipt_id.starts_with("receipt_"));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::new();
        assert!(matches!(
            OrderIntent::from_cart(&cart),
            Err(CoreError::EmptyCart)
        ));
    }

    /// ₹100.005 must become 10001 paise — rounding, not truncation.
    #[test]
    fn test_fractional_amount_rounds() {
        let amount = Amount::from_rupees_str("100.005").unwrap();
        let intent = OrderIntent::from_amount(amount, None).unwrap();
        assert_eq!(intent.amount_minor, 10001);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(matches!(
            OrderIntent::from_amount(Amount::zero(), None),
            Err(CoreError::InvalidAmount { .. })
        ));

        let negative = Amount::from_rupees_str("-1").unwrap();
        assert!(matches!(
            OrderIntent::from_amount(negative, None),
            Err(CoreError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_currency_override() {
        let amount = Amount::from_rupees_str("10").unwrap();
        let intent = OrderIntent::from_amount(amount, Some("USD")).unwrap();
        assert_eq!(intent.currency, "USD");
    }

    #[test]
    fn test_receipt_ids_are_unique() {
        let amount = Amount::from_rupees_str("10").unwrap();
        let a = OrderIntent::from_amount(amount, None).unwrap();
        let b = OrderIntent::from_amount(amount, None).unwrap();
        assert_ne!(a.receipt_id, b.receipt_id);
    }
}
