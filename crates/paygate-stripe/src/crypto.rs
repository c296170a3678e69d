//! Cryptographic helpers for webhook signatures.
//!
//! Stripe signs `"{timestamp}." ++ body` with HMAC-SHA256 keyed by the
//! endpoint's signing secret and sends the hex digest in the `v1` scheme.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Build the MAC over `"{timestamp}." ++ payload`.
fn signed_payload_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    // INVARIANT: HMAC-SHA256 accepts keys of any size per RFC 2104.
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts any key size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

/// Compute the hex-encoded `v1` signature for a payload.
///
/// # Returns
///
/// A hex-encoded HMAC-SHA256 digest (64 characters).
#[must_use]
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mac = signed_payload_mac(secret, timestamp, payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a hex-encoded `v1` signature against a payload.
///
/// The comparison runs in constant time. Signatures that are not valid hex
/// never match.
#[must_use]
pub fn verify_payload(secret: &str, timestamp: i64, payload: &[u8], signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };
    signed_payload_mac(secret, timestamp, payload)
        .verify_slice(&signature)
        .is_ok()
}
