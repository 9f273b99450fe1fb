//! Webhook authentication
//!
//! Verifies inbound confirmation payloads with a keyed signature and
//! provides the idempotent registration lookup.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use slotbroker_domain::WebhookRegistration;

type HmacSha256 = Hmac<Sha256>;

/// Verifies webhook payload signatures with a shared signing key.
pub struct WebhookVerifier {
    signing_key: String,
}

impl WebhookVerifier {
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self { signing_key: signing_key.into() }
    }

    /// Check `claimed_signature` (hex-encoded) against the HMAC-SHA-256 of
    /// the exact raw request body bytes.
    ///
    /// Returns `false` on any mismatch or malformed signature, never
    /// errors. The comparison is constant-time, so callers leak no timing
    /// information about the expected signature. A `false` result must be
    /// treated as "reject with 403, take no further action".
    pub fn verify(&self, raw_body: &[u8], claimed_signature: &str) -> bool {
        let Ok(claimed) = hex::decode(claimed_signature.trim()) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.signing_key.as_bytes()) else {
            return false;
        };
        mac.update(raw_body);
        mac.verify_slice(&claimed).is_ok()
    }

    /// Produce the hex signature for a body, as the provider would.
    ///
    /// Used by tests and local tooling to simulate provider callbacks.
    pub fn sign(&self, raw_body: &[u8]) -> String {
        let Ok(mut mac) = HmacSha256::new_from_slice(self.signing_key.as_bytes()) else {
            return String::new();
        };
        mac.update(raw_body);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Whether `callback_url` already has a registration, by exact URL match.
///
/// Used to make webhook registration idempotent: re-invoking the
/// registration flow while already registered is a skip, not an error.
pub fn is_registered(registrations: &[WebhookRegistration], callback_url: &str) -> bool {
    registrations.iter().any(|registration| registration.callback_url == callback_url)
}
