//! # Payment Signature Verification
//!
//! The one security-relevant piece of logic in the repo.
//!
//! ## The Verification Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Gateway callback delivers: { order_id, payment_id, signature }         │
//! │                                                                         │
//! │  Locally recompute:                                                     │
//! │      expected = hex( HMAC_SHA256( secret, order_id + "|" + payment_id ))│
//! │                                                                         │
//! │  Verified  ⇔  expected == signature  (byte-for-byte hex match,          │
//! │               compared in constant time)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A matching signature proves the callback originated from the gateway
//! (only the gateway and this merchant hold the secret) and was not forged
//! by the client.
//!
//! The comparison is constant-time: a byte-wise fold over the full digest
//! rather than a short-circuiting string equality, so response timing leaks
//! nothing about how much of a guessed signature matched.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::error::{RejectReason, VerificationResult};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Signature Verifier
// =============================================================================

/// Stateless verifier keyed by the merchant secret.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    /// Creates a verifier for the given merchant secret.
    pub fn new(secret: impl Into<String>) -> Self {
        SignatureVerifier {
            secret: secret.into(),
        }
    }

    /// Computes the expected hex signature for an (order, payment) pair.
    ///
    /// The signed payload is `order_id + "|" + payment_id`, exactly as the
    /// gateway computes it on its side.
    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        let payload = format!("{}|{}", order_id, payment_id);
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies a callback signature.
    ///
    /// Returns `ok == false` with [`RejectReason::SignatureMismatch`] on any
    /// mismatch; a mismatch is a result, never an error.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> VerificationResult {
        let expected = self.sign(order_id, payment_id);

        if constant_time_eq(&expected, signature) {
            VerificationResult::verified()
        } else {
            warn!(order_id = %order_id, payment_id = %payment_id, "Payment signature mismatch");
            VerificationResult::rejected(RejectReason::SignatureMismatch)
        }
    }
}

/// Constant-time string equality over the hex digests.
///
/// Length is compared first (digest length is not secret); the byte fold
/// always walks the full string.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "testsecret";
    const ORDER_ID: &str = "order_abc";
    const PAYMENT_ID: &str = "pay_xyz";

    #[test]
    fn test_sign_is_hex_sha256() {
        let verifier = SignatureVerifier::new(SECRET);
        let sig = verifier.sign(ORDER_ID, PAYMENT_ID);

        // 32-byte digest, lowercase hex
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        // Deterministic
        assert_eq!(sig, verifier.sign(ORDER_ID, PAYMENT_ID));
    }

    #[test]
    fn test_verify_accepts_exact_signature() {
        let verifier = SignatureVerifier::new(SECRET);
        let expected = verifier.sign(ORDER_ID, PAYMENT_ID);

        let result = verifier.verify(ORDER_ID, PAYMENT_ID, &expected);
        assert!(result.ok);
        assert!(result.reason.is_none());
    }

    /// Any single-character mutation of the signature must be rejected,
    /// at every position.
    #[test]
    fn test_verify_rejects_every_single_char_mutation() {
        let verifier = SignatureVerifier::new(SECRET);
        let expected = verifier.sign(ORDER_ID, PAYMENT_ID);

        for i in 0..expected.len() {
            let mut mutated: Vec<u8> = expected.clone().into_bytes();
            mutated[i] = if mutated[i] == b'0' { b'1' } else { b'0' };
            let mutated = String::from_utf8(mutated).unwrap();

            let result = verifier.verify(ORDER_ID, PAYMENT_ID, &mutated);
            assert!(!result.ok, "mutation at position {} was accepted", i);
            assert_eq!(result.reason, Some(RejectReason::SignatureMismatch));
        }
    }

    #[test]
    fn test_verify_rejects_wrong_length() {
        let verifier = SignatureVerifier::new(SECRET);
        let expected = verifier.sign(ORDER_ID, PAYMENT_ID);

        assert!(!verifier.verify(ORDER_ID, PAYMENT_ID, "").ok);
        assert!(!verifier.verify(ORDER_ID, PAYMENT_ID, &expected[..63]).ok);
        let too_long = format!("{}0", expected);
        assert!(!verifier.verify(ORDER_ID, PAYMENT_ID, &too_long).ok);
    }

    #[test]
    fn test_payload_ids_are_not_interchangeable() {
        let verifier = SignatureVerifier::new(SECRET);
        let sig = verifier.sign(ORDER_ID, PAYMENT_ID);

        // Swapped ids sign a different payload
        assert!(!verifier.verify(PAYMENT_ID, ORDER_ID, &sig).ok);
    }

    #[test]
    fn test_different_secret_rejects() {
        let verifier = SignatureVerifier::new(SECRET);
        let other = SignatureVerifier::new("othersecret");

        let sig = other.sign(ORDER_ID, PAYMENT_ID);
        assert!(!verifier.verify(ORDER_ID, PAYMENT_ID, &sig).ok);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "ab"));
        assert!(constant_time_eq("", ""));
    }
}
