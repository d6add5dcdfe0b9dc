//! # Checkout Error Types
//!
//! Errors and verification outcomes for the checkout flow.
//!
//! ## Propagation Policy
//! - A signature mismatch is a *result* ([`VerificationResult`]), never an
//!   error: `verify` only errors on transport-level failures.
//! - Gateway errors surface as retryable failures with the cart left
//!   intact. An unpaid state never silently clears the cart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::CoreError;

// =============================================================================
// Gateway Error
// =============================================================================

/// Failures talking to the payment gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway could not be reached or did not answer in time.
    ///
    /// ## When This Occurs
    /// - DNS/connect failure, TLS failure
    /// - The explicit request timeout elapsed
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),

    /// The gateway answered with a rejection (bad amount, unsupported
    /// currency, auth failure).
    #[error("Gateway rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The gateway answered but the body did not parse.
    #[error("Unexpected gateway response: {0}")]
    InvalidResponse(String),

    /// Client construction failed (bad TLS backend, bad timeout).
    #[error("Gateway client setup failed: {0}")]
    Setup(String),
}

// =============================================================================
// Verification Result
// =============================================================================

/// Why a checkout attempt ended in `Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The recomputed HMAC did not match the supplied signature.
    SignatureMismatch,

    /// A transport-level failure while verifying.
    TransportError,

    /// Gateway order creation failed.
    GatewayUnavailable,

    /// The gateway callback never arrived within the bounded interval.
    CallbackTimeout,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::SignatureMismatch => write!(f, "signature mismatch"),
            RejectReason::TransportError => write!(f, "transport error"),
            RejectReason::GatewayUnavailable => write!(f, "gateway unavailable"),
            RejectReason::CallbackTimeout => write!(f, "callback timeout"),
        }
    }
}

/// Outcome of a payment verification.
///
/// A mismatch is expressed as `ok == false` with a reason; it is never an
/// `Err`. Only transport failures of an HTTP-backed verifier use
/// [`RejectReason::TransportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationResult {
    /// True iff the signature matched byte-for-byte.
    pub ok: bool,

    /// Set when `ok` is false.
    pub reason: Option<RejectReason>,
}

impl VerificationResult {
    /// A successful verification.
    pub const fn verified() -> Self {
        VerificationResult {
            ok: true,
            reason: None,
        }
    }

    /// A failed verification with a reason.
    pub const fn rejected(reason: RejectReason) -> Self {
        VerificationResult {
            ok: false,
            reason: Some(reason),
        }
    }
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Failures of the checkout flow itself.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A checkout precondition failed (empty cart, invalid amount).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Gateway order creation failed; the attempt is rejected, the cart
    /// is intact, and the user may retry.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The requested transition is not valid from the current state
    /// (e.g., completing an attempt that never created an order).
    #[error("Invalid checkout transition: {0}")]
    InvalidTransition(String),
}

// =============================================================================
// Session Error
// =============================================================================

/// Failures loading or saving the persisted session files.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The session file did not parse.
    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// No usable session directory on this platform.
    #[error("No session directory available")]
    NoSessionDir,
}

// =============================================================================
// Unit Tests
// =============================================================================
