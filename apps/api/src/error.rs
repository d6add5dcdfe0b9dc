//! # API Error Boundary
//!
//! Internal errors carry rich context; the wire carries a stable
//! `{ code, message }` shape. The conversion happens exactly once, here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use storefront_checkout::{CheckoutError, GatewayError};
use storefront_core::CoreError;

/// Stable machine-readable error codes for API consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidRequest,
    EmptyCart,
    SignatureMismatch,
    GatewayUnavailable,
    Unauthorized,
    Internal,
}

/// The error shape every endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest | ErrorCode::EmptyCart | ErrorCode::SignatureMismatch => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::GatewayUnavailable => StatusCode::BAD_GATEWAY,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        let code = match error {
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            _ => ErrorCode::InvalidRequest,
        };
        ApiError::new(code, error.to_string())
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        let code = match error {
            GatewayError::Rejected { .. } => ErrorCode::InvalidRequest,
            _ => ErrorCode::GatewayUnavailable,
        };
        ApiError::new(code, error.to_string())
    }
}

impl From<CheckoutError> for ApiError {
    fn from(error: CheckoutError) -> Self {
        match error {
            CheckoutError::Core(e) => e.into(),
            CheckoutError::Gateway(e) => e.into(),
            CheckoutError::InvalidTransition(msg) => ApiError::new(ErrorCode::Internal, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_maps_to_400() {
        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_gateway_unavailable_maps_to_502() {
        let err: ApiError = GatewayError::Unavailable("connection refused".to_string()).into();
        assert_eq!(err.code, ErrorCode::GatewayUnavailable);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_wire_shape() {
        let err = ApiError::new(ErrorCode::SignatureMismatch, "Payment could not be verified");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "SIGNATURE_MISMATCH");
        assert_eq!(json["message"], "Payment could not be verified");
    }
}
