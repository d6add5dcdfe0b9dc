//! HTTP route handlers.

pub mod account;
pub mod payment;
pub mod products;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/products", get(products::list))
        .route("/create-order", post(payment::create_order))
        .route("/verify-payment", post(payment::verify_payment))
        .route("/me", get(account::current_user))
        .with_state(state)
}
