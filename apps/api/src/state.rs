//! Shared application state.
//!
//! The API is stateless with respect to carts and orders: state here is
//! config-derived collaborators only, cheap to clone per request.

use std::sync::Arc;

use storefront_checkout::{CheckoutConfig, RazorpayClient, SignatureVerifier};

use crate::auth::JwtManager;

/// Everything a request handler needs.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CheckoutConfig>,
    pub gateway: Arc<RazorpayClient>,
    pub verifier: Arc<SignatureVerifier>,
    pub jwt: Arc<JwtManager>,
}

impl AppState {
    pub fn new(
        config: CheckoutConfig,
        gateway: RazorpayClient,
        jwt_secret: String,
    ) -> Self {
        let verifier = SignatureVerifier::new(config.key_secret.clone());
        AppState {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            verifier: Arc::new(verifier),
            jwt: Arc::new(JwtManager::new(jwt_secret)),
        }
    }
}
