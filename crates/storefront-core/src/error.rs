//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  └── CoreError        - Cart ledger / intent builder failures          │
//! │                                                                         │
//! │  storefront-checkout errors (separate crate)                           │
//! │  ├── GatewayError     - Gateway transport / order-creation failures    │
//! │  └── CheckoutError    - Checkout flow failures                         │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: CoreError → CheckoutError → ApiError → Frontend                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation Policy
//! Cart ledger misses (decrement/remove of an absent line) are handled as
//! no-ops inside [`crate::cart`] and never surface here. Only checkout
//! preconditions (empty cart, bad amount) and capacity guards are errors.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent checkout preconditions or ledger capacity
/// violations. They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with zero cart lines.
    ///
    /// ## When This Occurs
    /// - User reaches the checkout page with an empty (or just-cleared) cart
    ///
    /// This is rejected *before* any gateway call is made.
    #[error("Cart is empty")]
    EmptyCart,

    /// The cart total is not a chargeable amount.
    ///
    /// ## When This Occurs
    /// - Total is zero or negative (should be unreachable through the
    ///   ledger, but the intent builder re-checks)
    /// - Total overflows the gateway's minor-unit integer
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// Cart has exceeded the maximum allowed number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
