//! # Checkout Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults.
//!
//! ## Environment Variables
//! ```text
//! RAZORPAY_KEY_ID                  merchant key id (required, trimmed)
//! RAZORPAY_KEY_SECRET              merchant key secret (required, trimmed)
//! STOREFRONT_GATEWAY_URL           gateway API base (default: Razorpay prod)
//! STOREFRONT_CURRENCY              currency code (default: INR)
//! STOREFRONT_REQUEST_TIMEOUT_SECS  gateway request timeout (default: 10)
//! STOREFRONT_CALLBACK_TIMEOUT_SECS gateway UI callback bound (default: 300)
//! ```
//!
//! Key material is trimmed on load: the deployment environment has shipped
//! keys with trailing newlines before, and the gateway rejects them.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Checkout/gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Gateway merchant key id.
    pub key_id: String,

    /// Gateway merchant key secret. Also the HMAC key for signature
    /// verification.
    pub key_secret: String,

    /// Gateway API base URL.
    pub api_base: String,

    /// Currency code for order intents.
    pub currency: String,

    /// Timeout for each gateway HTTP request (seconds).
    pub request_timeout_secs: u64,

    /// How long to wait for the gateway UI callback before the attempt is
    /// rejected (seconds). Bounded so a cart is never left ambiguously
    /// "maybe ordered".
    pub callback_timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.razorpay.com".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_callback_timeout() -> u64 {
    300
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            key_id: String::new(),
            key_secret: String::new(),
            api_base: default_api_base(),
            currency: default_currency(),
            request_timeout_secs: default_request_timeout(),
            callback_timeout_secs: default_callback_timeout(),
        }
    }
}

impl CheckoutConfig {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = CheckoutConfig {
            key_id: env::var("RAZORPAY_KEY_ID")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            key_secret: env::var("RAZORPAY_KEY_SECRET")
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            ..CheckoutConfig::default()
        };

        if let Ok(url) = env::var("STOREFRONT_GATEWAY_URL") {
            config.api_base = url.trim_end_matches('/').to_string();
        }
        if let Ok(currency) = env::var("STOREFRONT_CURRENCY") {
            config.currency = currency;
        }
        if let Ok(secs) = env::var("STOREFRONT_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = secs
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_REQUEST_TIMEOUT_SECS"))?;
        }
        if let Ok(secs) = env::var("STOREFRONT_CALLBACK_TIMEOUT_SECS") {
            config.callback_timeout_secs = secs
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_CALLBACK_TIMEOUT_SECS"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_id.is_empty() {
            return Err(ConfigError::MissingKey("RAZORPAY_KEY_ID"));
        }
        if self.key_secret.is_empty() {
            return Err(ConfigError::MissingKey("RAZORPAY_KEY_SECRET"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("STOREFRONT_REQUEST_TIMEOUT_SECS"));
        }
        if self.callback_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "STOREFRONT_CALLBACK_TIMEOUT_SECS",
            ));
        }
        Ok(())
    }

    /// Gateway request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Callback bound as a `Duration`.
    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required key is missing or empty.
    #[error("Missing required configuration: {0}")]
    MissingKey(&'static str),

    /// A value failed to parse or is out of range.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}
