//! Webhook signature verification.
//!
//! Signatures are computed over the exact bytes Stripe sent, so the body must
//! reach [`construct_event`] before anything parses or re-encodes it.
//! [`RawPayload`] can only be built from raw bytes for that reason.

use std::time::Duration;

use bytes::Bytes;

use crate::crypto::{sign_payload, verify_payload};
use crate::error::WebhookError;
use crate::types::WebhookEvent;

/// Name of the HTTP header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Unparsed webhook request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload(Bytes);

impl RawPayload {
    /// The original bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Body length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Bytes> for RawPayload {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<String> for RawPayload {
    fn from(body: String) -> Self {
        Self(Bytes::from(body))
    }
}

impl From<&'static [u8]> for RawPayload {
    fn from(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }
}

impl From<&'static str> for RawPayload {
    fn from(body: &'static str) -> Self {
        Self(Bytes::from_static(body.as_bytes()))
    }
}

/// Parsed `Stripe-Signature` header.
#[derive(Debug)]
struct SignatureHeader<'a> {
    timestamp: i64,
    signatures: Vec<&'a str>,
}

impl<'a> SignatureHeader<'a> {
    // Format: t=timestamp,v1=signature,v1=signature2,...
    fn parse(header: &'a str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<&str> = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", ts)) => timestamp = Some(ts),
                Some(("v1", sig)) => signatures.push(sig),
                _ => {}
            }
        }

        let timestamp = timestamp
            .and_then(|ts| ts.parse::<i64>().ok())
            .ok_or(WebhookError::MalformedHeader)?;

        if signatures.is_empty() {
            return Err(WebhookError::NoSignatures);
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

/// Verify a webhook signature and parse the event.
///
/// # Arguments
///
/// * `payload` - Raw request body
/// * `header` - Value of the `Stripe-Signature` header
/// * `secret` - Webhook signing secret (`whsec_...`)
/// * `tolerance` - Maximum timestamp age; zero disables the check
/// * `now` - Current Unix time in seconds
pub fn construct_event(
    payload: &RawPayload,
    header: &str,
    secret: &str,
    tolerance: Duration,
    now: i64,
) -> Result<WebhookEvent, WebhookError> {
    let header = SignatureHeader::parse(header)?;

    let valid = header
        .signatures
        .iter()
        .any(|sig| verify_payload(secret, header.timestamp, payload.as_bytes(), sig));
    if !valid {
        return Err(WebhookError::SignatureMismatch);
    }

    let age_seconds = now - header.timestamp;
    let max_age = i64::try_from(tolerance.as_secs()).unwrap_or(i64::MAX);
    if max_age > 0 && age_seconds > max_age {
        return Err(WebhookError::TimestampOutsideTolerance { age_seconds });
    }

    serde_json::from_slice(payload.as_bytes())
        .map_err(|e| WebhookError::InvalidPayload(e.to_string()))
}

/// Build a valid `Stripe-Signature` header for a payload.
///
/// Useful for signing test events.
#[must_use]
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!("t={timestamp},v1={}", sign_payload(secret, timestamp, payload))
}
