//! Checkout session handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use paygate_stripe::{CheckoutSession, SessionCreateParams};

use crate::error::ApiError;
use crate::state::AppState;

/// Created checkout session response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// URL to redirect the customer to.
    pub url: String,
}

/// Create a Checkout session.
pub async fn create_checkout(
    State(state): State<Arc<AppState>>,
    Json(params): Json<SessionCreateParams>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    if params.success_url.trim().is_empty() {
        return Err(ApiError::BadRequest("success_url is required".into()));
    }

    let url = state.gateway.create_checkout(&params).await?;

    Ok(Json(CheckoutResponse { url }))
}

/// Retrieve a Checkout session.
pub async fn get_checkout(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<CheckoutSession>, ApiError> {
    let session = state.gateway.get_checkout(&session_id).await?;
    Ok(Json(session))
}
