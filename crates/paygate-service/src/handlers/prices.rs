//! Price lookup handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use paygate_stripe::Price;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for listing prices.
#[derive(Debug, Default, Deserialize)]
pub struct PricesQuery {
    /// Comma-separated lookup keys.
    #[serde(default)]
    pub lookup_keys: Option<String>,
}

impl PricesQuery {
    /// Split the lookup keys, dropping empty entries.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.lookup_keys
            .as_deref()
            .map(|keys| {
                keys.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Prices response.
#[derive(Debug, Serialize)]
pub struct PricesResponse {
    /// Prices matching the lookup keys.
    pub prices: Vec<Price>,
}

/// List prices by lookup key.
pub async fn list_prices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<PricesResponse>, ApiError> {
    let keys = query.keys();
    let prices = state.gateway.get_prices(keys.as_slice()).await?;

    tracing::debug!(lookup_keys = ?keys, count = prices.len(), "Listed prices");

    Ok(Json(PricesResponse { prices }))
}
