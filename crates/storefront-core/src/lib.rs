//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the checkout slice. It contains the cart
//! ledger, the wishlist, money arithmetic, and the order-intent builder as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Frontend (React SPA)                        │   │
//! │  │    Products UI ──► Cart UI ──► Checkout UI ──► Gateway modal   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    GET /products, POST /create-order, POST /verify-payment     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │ wishlist  │  │  intent   │  │   │
//! │  │   │  Amount   │  │ CartLine  │  │ Wishlist  │  │OrderIntent│  │   │
//! │  │   │MinorUnits │  │  totals   │  │  toggle   │  │ receipts  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CurrentUser, PaymentSelection)
//! - [`money`] - Decimal `Amount` type and minor-unit conversion
//! - [`cart`] - The cart ledger (lines, quantities, derived totals)
//! - [`wishlist`] - Wishlist ledger (toggle/remove)
//! - [`intent`] - Order-intent builder (cart total → gateway request)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no side effects
//! 2. **No I/O**: network and file system access are FORBIDDEN here
//! 3. **Exact Money**: decimal arithmetic, rounding only at the minor-unit
//!    boundary - never floats, never truncation
//! 4. **Derived Totals**: cart totals are computed fresh on every read;
//!    there is no cached total that can drift from the line list
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::Cart;
//! use storefront_core::intent::OrderIntent;
//! use storefront_core::types::Product;
//!
//! let mut cart = Cart::new();
//! cart.add(&Product::sample("p-1", "Wireless Headphones", "499")).unwrap();
//!
//! // ₹499.00 → 49900 paise
//! let intent = OrderIntent::from_cart(&cart).unwrap();
//! assert_eq!(intent.amount_minor, 49900);
//! assert_eq!(intent.currency, "INR");
//! ```

pub mod cart;
pub mod error;
pub mod intent;
pub mod money;
pub mod types;
pub mod wishlist;

// Re-exports for convenience: `use storefront_core::Cart` instead of
// `use storefront_core::cart::Cart`
pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult};
pub use intent::OrderIntent;
pub use money::Amount;
pub use types::{CurrentUser, PaymentSelection, Product};
pub use wishlist::Wishlist;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default currency code for order intents.
///
/// The gateway charges in paise (the INR minor unit); every intent carries
/// this code unless explicitly overridden.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Maximum lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps gateway order payloads reasonable.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., holding the + button).
pub const MAX_LINE_QUANTITY: u32 = 999;
