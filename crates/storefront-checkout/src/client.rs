//! # Payment Gateway Client
//!
//! The [`PaymentGateway`] trait is the seam between the checkout flow and
//! the outside world: the flow drives it, tests mock it, and
//! [`RazorpayClient`] is the production implementation.
//!
//! ## Order Creation
//! ```text
//! OrderIntent ──► POST {api_base}/v1/orders
//!                 basic auth: key_id / key_secret
//!                 body: { "amount": <paise>, "currency": "INR",
//!                         "receipt": "receipt_..." }
//!                      │
//!        ┌─────────────┼──────────────────┐
//!        ▼             ▼                  ▼
//!   2xx + JSON    non-2xx          timeout / connect
//!   GatewayOrder  GatewayError::   GatewayError::
//!                 Rejected         Unavailable
//! ```
//!
//! Every request carries an explicit timeout. A hung gateway surfaces as
//! [`GatewayError::Unavailable`] rather than blocking the checkout forever.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use storefront_core::OrderIntent;

use crate::config::CheckoutConfig;
use crate::error::{GatewayError, VerificationResult};
use crate::signature::SignatureVerifier;

// =============================================================================
// Wire Types
// =============================================================================

/// The gateway's answer to order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-assigned order id (`order_...`).
    pub id: String,

    /// Echoed amount in minor units.
    pub amount: i64,

    /// Echoed currency code.
    pub currency: String,

    /// Echoed receipt id.
    #[serde(default)]
    pub receipt: Option<String>,
}

/// The fields the gateway's browser callback delivers after the user
/// completes (or fakes) a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCallback {
    /// Gateway order id, as returned by order creation.
    pub order_id: String,

    /// Gateway payment id (`pay_...`).
    pub payment_id: String,

    /// Hex HMAC signature over `order_id + "|" + payment_id`.
    pub signature: String,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: GatewayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    #[serde(default)]
    description: String,
}

// =============================================================================
// Gateway Trait
// =============================================================================

/// Seam between the checkout flow and the payment gateway.
///
/// The flow only ever needs two things from a gateway: create an order for
/// an intent, and verify a callback signature. Everything else (auth,
/// retries, endpoints) is an implementation detail behind this trait.
pub trait PaymentGateway: Send + Sync {
    /// Registers an order with the gateway, returning its order id.
    fn create_order(
        &self,
        intent: &OrderIntent,
    ) -> impl std::future::Future<Output = Result<GatewayOrder, GatewayError>> + Send;

    /// Verifies a callback signature. Pure local computation.
    fn verify(&self, callback: &PaymentCallback) -> VerificationResult;
}

// =============================================================================
// Razorpay Client
// =============================================================================

/// Production gateway client backed by the Razorpay Orders REST API.
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    api_base: String,
    verifier: SignatureVerifier,
}

impl RazorpayClient {
    /// Builds a client from checkout configuration.
    pub fn new(config: &CheckoutConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GatewayError::Setup(e.to_string()))?;

        Ok(RazorpayClient {
            http,
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            api_base: config.api_base.clone(),
            verifier: SignatureVerifier::new(config.key_secret.clone()),
        })
    }
}

impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, intent: &OrderIntent) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.api_base);
        let body = CreateOrderBody {
            amount: intent.amount_minor,
            currency: &intent.currency,
            receipt: &intent.receipt_id,
        };

        debug!(
            amount_minor = intent.amount_minor,
            currency = %intent.currency,
            receipt_id = %intent.receipt_id,
            "Creating gateway order"
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Unavailable(format!("request timed out: {}", e))
                } else {
                    GatewayError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<GatewayErrorBody>().await {
                Ok(body) if !body.error.description.is_empty() => body.error.description,
                _ => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let order: GatewayOrder = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        info!(order_id = %order.id, amount_minor = order.amount, "Gateway order created");
        Ok(order)
    }

    fn verify(&self, callback: &PaymentCallback) -> VerificationResult {
        self.verifier
            .verify(&callback.order_id, &callback.payment_id, &callback.signature)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
