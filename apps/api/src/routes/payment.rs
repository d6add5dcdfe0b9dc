//! Payment endpoints.
//!
//! ## Wire Contract
//! ```text
//! POST /create-order
//!   { "amount": 499.0, "currency": "INR"? }
//!   -> 200 { "id": "order_...", "amount": 49900, "currency": "INR" }
//!   -> 400 on missing/non-positive amount
//!
//! POST /verify-payment
//!   { "razorpay_order_id", "razorpay_payment_id", "razorpay_signature" }
//!   -> 200 { "message": "Payment verified successfully" }
//!   -> 400 { code: SIGNATURE_MISMATCH, ... } on mismatch
//! ```
//!
//! The rupee amount is converted to minor units by multiplying by 100 and
//! rounding half away from zero. The verification outcome depends only on
//! the HMAC math; the server stores nothing about the order.

use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_checkout::{CheckoutConfig, PaymentCallback, PaymentGateway};
use storefront_core::{Amount, OrderIntent};

use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Order total in rupees. Accepts a JSON number or decimal string.
    pub amount: Decimal,

    /// Optional currency override.
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

/// Callback fields exactly as the gateway SDK posts them.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Builds the order intent for a create-order request.
///
/// The request currency wins when present; otherwise the configured
/// storefront currency applies.
fn build_intent(
    request: &CreateOrderRequest,
    config: &CheckoutConfig,
) -> Result<OrderIntent, ApiError> {
    let amount = Amount::from_rupees(request.amount);
    let currency = request.currency.as_deref().unwrap_or(&config.currency);
    Ok(OrderIntent::from_amount(amount, Some(currency))?)
}

/// `POST /create-order`
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let intent = build_intent(&request, &state.config)?;

    let order = state.gateway.create_order(&intent).await?;

    info!(order_id = %order.id, amount_minor = order.amount, "Order created");
    Ok(Json(CreateOrderResponse {
        id: order.id,
        amount: order.amount,
        currency: order.currency,
    }))
}

/// `POST /verify-payment`
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let callback = PaymentCallback {
        order_id: request.razorpay_order_id,
        payment_id: request.razorpay_payment_id,
        signature: request.razorpay_signature,
    };

    let result = state
        .verifier
        .verify(&callback.order_id, &callback.payment_id, &callback.signature);

    if !result.ok {
        return Err(ApiError::new(
            ErrorCode::SignatureMismatch,
            "Payment could not be verified",
        ));
    }

    info!(order_id = %callback.order_id, payment_id = %callback.payment_id, "Payment verified");
    Ok(Json(VerifyPaymentResponse {
        message: "Payment verified successfully".to_string(),
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_parses_number_and_string() {
        let from_number: CreateOrderRequest =
            serde_json::from_str(r#"{"amount": 499}"#).unwrap();
        assert_eq!(from_number.amount, Decimal::new(499, 0));
        assert!(from_number.currency.is_none());

        let from_string: CreateOrderRequest =
            serde_json::from_str(r#"{"amount": "100.005", "currency": "USD"}"#).unwrap();
        assert_eq!(from_string.amount.to_string(), "100.005");
        assert_eq!(from_string.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_create_order_request_requires_amount() {
        let result: Result<CreateOrderRequest, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_request_uses_gateway_field_names() {
        let json = r#"{
            "razorpay_order_id": "order_abc",
            "razorpay_payment_id": "pay_xyz",
            "razorpay_signature": "deadbeef"
        }"#;
        let request: VerifyPaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.razorpay_order_id, "order_abc");
        assert_eq!(request.razorpay_payment_id, "pay_xyz");
    }

    #[test]
    fn test_non_positive_amount_is_rejected_locally() {
        let amount = Amount::from_rupees(Decimal::ZERO);
        assert!(OrderIntent::from_amount(amount, None).is_err());
    }

    /// The configured currency is the create-order default; an explicit
    /// request currency still overrides it.
    #[test]
    fn test_configured_currency_is_the_default() {
        let config = CheckoutConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: "testsecret".to_string(),
            currency: "USD".to_string(),
            ..CheckoutConfig::default()
        };

        let request: CreateOrderRequest = serde_json::from_str(r#"{"amount": 499}"#).unwrap();
        let intent = build_intent(&request, &config).unwrap();
        assert_eq!(intent.currency, "USD");
        assert_eq!(intent.amount_minor, 49900);

        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"amount": 499, "currency": "EUR"}"#).unwrap();
        let intent = build_intent(&request, &config).unwrap();
        assert_eq!(intent.currency, "EUR");
    }
}
