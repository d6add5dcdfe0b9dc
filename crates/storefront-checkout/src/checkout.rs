//! # Checkout State Machine
//!
//! One [`CheckoutAttempt`] per "place order" click.
//!
//! ## States
//! ```text
//!                         ┌──────┐
//!            cash on      │ Idle │
//!        ┌── delivery ────┴──┬───┘
//!        │                   │ begin (non-empty cart)
//!        │                   ▼
//!        │           ┌───────────────┐   gateway create_order
//!        │           │ IntentCreated │──────────┐
//!        │           └───────┬───────┘          │ error
//!        │                   │ order id         ▼
//!        │                   ▼              Rejected
//!        │       ┌─────────────────────────┐ (gateway unavailable,
//!        │       │ AwaitingGatewayCallback │  cart intact)
//!        │       └────────────┬────────────┘
//!        │          callback  │        │ timeout
//!        │                    ▼        ▼
//!        │              ┌───────────┐ Rejected (callback timeout)
//!        │              │ Verifying │
//!        │              └─────┬─────┘
//!        │          match     │     mismatch
//!        ▼                    ▼        ▼
//!     Settled              Settled  Rejected (signature mismatch)
//!   (cart cleared)    (cart cleared)  (cart intact)
//! ```
//!
//! ## Invariants
//! - The cart is cleared exactly once, on the transition into `Settled`,
//!   and on no other transition.
//! - An empty cart is rejected in `begin` before any gateway call.
//! - `Settled` and `Rejected` are terminal.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use storefront_core::{Cart, OrderIntent};

use crate::client::{GatewayOrder, PaymentCallback, PaymentGateway};
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, RejectReason};

/// Fallback callback bound, matching the config default.
const DEFAULT_CALLBACK_BOUND: Duration = Duration::from_secs(300);

// =============================================================================
// Checkout State
// =============================================================================

/// Where a checkout attempt currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// No attempt in flight.
    Idle,

    /// An intent was built locally; the gateway has not been called yet.
    IntentCreated,

    /// The gateway issued an order id; waiting for the payment UI callback.
    AwaitingGatewayCallback,

    /// A callback arrived; its signature is being checked.
    Verifying,

    /// Terminal success. The cart has been cleared.
    Settled,

    /// Terminal failure. The cart is intact.
    Rejected(RejectReason),
}

impl CheckoutState {
    /// True for `Settled` and `Rejected`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Settled | CheckoutState::Rejected(_))
    }
}

// =============================================================================
// Checkout Attempt
// =============================================================================

/// Drives a single order from `Idle` to a terminal state.
///
/// The attempt owns its state; the caller owns the cart and lends it
/// mutably to each transition, so the attempt can clear it on settlement
/// and the clearing stays visible at the call site.
#[derive(Debug)]
pub struct CheckoutAttempt {
    state: CheckoutState,
    intent: Option<OrderIntent>,
    order: Option<GatewayOrder>,
    callback_bound: Duration,
}

impl CheckoutAttempt {
    /// A fresh attempt in `Idle` with the default callback bound.
    pub fn new() -> Self {
        Self::with_callback_bound(DEFAULT_CALLBACK_BOUND)
    }

    /// A fresh attempt whose callback bound comes from configuration.
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self::with_callback_bound(config.callback_timeout())
    }

    /// A fresh attempt with an explicit callback bound.
    pub fn with_callback_bound(callback_bound: Duration) -> Self {
        CheckoutAttempt {
            state: CheckoutState::Idle,
            intent: None,
            order: None,
            callback_bound,
        }
    }

    /// Current state.
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The intent built by `begin`, if any.
    pub fn intent(&self) -> Option<&OrderIntent> {
        self.intent.as_ref()
    }

    /// The gateway order issued by `begin`, if any.
    pub fn order(&self) -> Option<&GatewayOrder> {
        self.order.as_ref()
    }

    /// Settles a cash-on-delivery order: `Idle → Settled` directly, zero
    /// gateway involvement. The cart is cleared.
    pub fn place_cash_on_delivery(&mut self, cart: &mut Cart) -> Result<(), CheckoutError> {
        self.require_state(&CheckoutState::Idle, "place_cash_on_delivery")?;
        // Same precondition as the gateway path
        let intent = OrderIntent::from_cart(cart)?;

        info!(
            amount_minor = intent.amount_minor,
            receipt_id = %intent.receipt_id,
            "Order settled (cash on delivery)"
        );
        cart.clear();
        self.intent = Some(intent);
        self.state = CheckoutState::Settled;
        Ok(())
    }

    /// Starts a gateway checkout: builds the intent, registers the order
    /// with the gateway, and moves to `AwaitingGatewayCallback`.
    ///
    /// An empty cart fails here, before any gateway call. A gateway
    /// failure moves the attempt to `Rejected` with the cart untouched,
    /// and the error is also returned so the caller can surface it.
    pub async fn begin<G: PaymentGateway>(
        &mut self,
        cart: &Cart,
        gateway: &G,
    ) -> Result<&GatewayOrder, CheckoutError> {
        self.require_state(&CheckoutState::Idle, "begin")?;

        let intent = OrderIntent::from_cart(cart)?;
        self.state = CheckoutState::IntentCreated;

        match gateway.create_order(&intent).await {
            Ok(order) => {
                info!(order_id = %order.id, "Awaiting gateway callback");
                self.intent = Some(intent);
                self.state = CheckoutState::AwaitingGatewayCallback;
                Ok(self.order.insert(order))
            }
            Err(e) => {
                warn!(error = %e, "Gateway order creation failed");
                self.state = CheckoutState::Rejected(RejectReason::GatewayUnavailable);
                Err(e.into())
            }
        }
    }

    /// Feeds the gateway callback into the attempt and resolves it.
    ///
    /// On a verified signature the cart is cleared and the attempt settles;
    /// on a mismatch the attempt is rejected and the cart stays intact.
    /// Either way the attempt is terminal afterwards.
    pub fn complete<G: PaymentGateway>(
        &mut self,
        cart: &mut Cart,
        gateway: &G,
        callback: &PaymentCallback,
    ) -> Result<&CheckoutState, CheckoutError> {
        self.require_state(&CheckoutState::AwaitingGatewayCallback, "complete")?;
        self.state = CheckoutState::Verifying;

        let result = gateway.verify(callback);
        if result.ok {
            info!(order_id = %callback.order_id, payment_id = %callback.payment_id, "Order settled");
            cart.clear();
            self.state = CheckoutState::Settled;
        } else {
            let reason = result.reason.unwrap_or(RejectReason::SignatureMismatch);
            warn!(order_id = %callback.order_id, reason = %reason, "Order rejected");
            self.state = CheckoutState::Rejected(reason);
        }
        Ok(&self.state)
    }

    /// Gives up on a callback that never arrived: the attempt is rejected
    /// with [`RejectReason::CallbackTimeout`] and the cart is intact.
    pub fn expire(&mut self) -> Result<&CheckoutState, CheckoutError> {
        self.require_state(&CheckoutState::AwaitingGatewayCallback, "expire")?;
        warn!("Gateway callback never arrived, rejecting attempt");
        self.state = CheckoutState::Rejected(RejectReason::CallbackTimeout);
        Ok(&self.state)
    }

    /// Waits for a callback from `rx` for at most the attempt's callback
    /// bound, then resolves.
    ///
    /// A timely callback goes through [`Self::complete`]; a timeout or a
    /// dropped sender goes through [`Self::expire`]. The attempt is always
    /// terminal when this returns.
    pub async fn complete_within<G: PaymentGateway>(
        &mut self,
        cart: &mut Cart,
        gateway: &G,
        rx: tokio::sync::oneshot::Receiver<PaymentCallback>,
    ) -> Result<&CheckoutState, CheckoutError> {
        match timeout(self.callback_bound, rx).await {
            Ok(Ok(callback)) => self.complete(cart, gateway, &callback),
            // Timeout elapsed, or the callback side went away
            Ok(Err(_)) | Err(_) => self.expire(),
        }
    }

    fn require_state(
        &self,
        expected: &CheckoutState,
        operation: &str,
    ) -> Result<(), CheckoutError> {
        if &self.state != expected {
            return Err(CheckoutError::InvalidTransition(format!(
                "{} requires {:?}, attempt is {:?}",
                operation, expected, self.state
            )));
        }
        Ok(())
    }
}

impl Default for CheckoutAttempt {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
