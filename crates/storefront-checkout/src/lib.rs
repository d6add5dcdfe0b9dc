//! # Storefront Checkout
//!
//! Everything between "place order" and a settled or rejected payment.
//!
//! ## Flow
//! ```text
//! SharedCart ──► CheckoutAttempt::begin ──► PaymentGateway::create_order
//!                       │                        (RazorpayClient)
//!                       ▼
//!            AwaitingGatewayCallback
//!                       │ callback { order_id, payment_id, signature }
//!                       ▼
//!              SignatureVerifier (HMAC-SHA256, constant-time compare)
//!                 │                │
//!                 ▼ match          ▼ mismatch
//!          Settled (cart          Rejected (cart intact)
//!          cleared)
//! ```
//!
//! The pure cart/intent types live in `storefront-core`; this crate adds
//! the I/O: gateway HTTP, signature verification, session persistence,
//! and the state machine that ties them together.

pub mod checkout;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod signature;

pub use checkout::{CheckoutAttempt, CheckoutState};
pub use client::{GatewayOrder, PaymentCallback, PaymentGateway, RazorpayClient};
pub use config::{CheckoutConfig, ConfigError};
pub use error::{CheckoutError, GatewayError, RejectReason, SessionError, VerificationResult};
pub use session::{SessionStore, SharedCart, SharedWishlist};
pub use signature::SignatureVerifier;
