//! Stripe webhook handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use paygate_stripe::webhook::SIGNATURE_HEADER;
use paygate_stripe::RawPayload;

use crate::error::ApiError;
use crate::state::AppState;

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Whether the webhook was accepted.
    pub received: bool,
    /// Event ID.
    pub event_id: String,
    /// Event type.
    pub event_type: String,
}

/// Handle Stripe webhooks.
///
/// The body is taken as raw bytes so the signature is checked against exactly
/// what Stripe sent. Events are verified and logged; acting on them is left to
/// downstream consumers.
pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("Missing Stripe signature".into()))?;

    let payload = RawPayload::from(body);
    let event = state
        .gateway
        .validate_and_get_event(&payload, signature)
        .await?;

    tracing::info!(
        event_type = %event.event_type,
        event_id = %event.id,
        livemode = event.livemode,
        "Received Stripe webhook"
    );

    Ok(Json(WebhookResponse {
        received: true,
        event_id: event.id,
        event_type: event.event_type,
    }))
}
