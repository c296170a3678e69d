//! Subscription handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use paygate_stripe::Subscription;

use crate::error::ApiError;
use crate::state::AppState;

/// Retrieve a subscription.
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Path(subscription_id): Path<String>,
) -> Result<Json<Subscription>, ApiError> {
    let subscription = state.gateway.get_subscription(&subscription_id).await?;
    Ok(Json(subscription))
}
