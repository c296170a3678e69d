//! Stripe API client implementation.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::config::{StripeConfig, DEFAULT_API_BASE_URL, DEFAULT_WEBHOOK_TOLERANCE_SECONDS};
use crate::error::{StripeError, WebhookError};
use crate::types::{
    CheckoutSession, Price, SessionCreateParams, StripeErrorResponse, StripeList, Subscription,
    WebhookEvent,
};
use crate::webhook::{self, RawPayload};

/// Stripe API client.
///
/// Holding a `StripeClient` means an API key was available: there is no way to
/// build one without it.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    webhook_tolerance: Duration,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("base_url", &self.base_url.as_str())
            .field("webhook_tolerance", &self.webhook_tolerance)
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Create a new Stripe client against the public API with default settings.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    pub fn new(api_key: impl Into<String>) -> Result<Self, StripeError> {
        Self::with_options(
            api_key,
            DEFAULT_API_BASE_URL,
            Duration::from_secs(30),
            Duration::from_secs(DEFAULT_WEBHOOK_TOLERANCE_SECONDS),
        )
    }

    /// Create a client from configuration. Returns `None` without an API key.
    pub fn from_config(config: &StripeConfig) -> Result<Option<Self>, StripeError> {
        config
            .api_key
            .as_ref()
            .map(|key| {
                Self::with_options(
                    key.clone(),
                    &config.api_base_url,
                    config.timeout,
                    config.webhook_tolerance,
                )
            })
            .transpose()
    }

    /// Create a client with explicit options.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key
    /// * `base_url` - API base URL, e.g. `https://api.stripe.com/v1`
    /// * `timeout` - Per-request timeout
    /// * `webhook_tolerance` - Maximum webhook timestamp age; zero disables the check
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
        webhook_tolerance: Duration,
    ) -> Result<Self, StripeError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| StripeError::Url(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StripeError::Url(format!("{base_url}: not a base URL")));
        }

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
            webhook_tolerance,
        })
    }

    /// List prices by lookup key.
    ///
    /// An empty slice is forwarded unchanged; Stripe then lists prices without
    /// a lookup-key filter.
    pub async fn list_prices<S: AsRef<str>>(
        &self,
        lookup_keys: &[S],
    ) -> Result<StripeList<Price>, StripeError> {
        let query: Vec<(&str, &str)> = lookup_keys
            .iter()
            .map(|key| ("lookup_keys[]", key.as_ref()))
            .collect();

        tracing::debug!(lookup_keys = query.len(), "Listing Stripe prices");

        let response = self
            .client
            .get(self.endpoint(&["prices"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .query(&query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a Checkout session.
    pub async fn create_checkout_session(
        &self,
        params: &SessionCreateParams,
    ) -> Result<CheckoutSession, StripeError> {
        tracing::debug!(
            mode = params.mode.as_str(),
            line_items = params.line_items.len(),
            client_reference_id = ?params.client_reference_id,
            "Creating Stripe checkout session"
        );

        let response = self
            .client
            .post(self.endpoint(&["checkout", "sessions"])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params.to_form())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Retrieve a Checkout session by ID.
    pub async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let response = self
            .client
            .get(self.endpoint(&["checkout", "sessions", session_id])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Retrieve a subscription by ID.
    pub async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, StripeError> {
        let response = self
            .client
            .get(self.endpoint(&["subscriptions", subscription_id])?)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Verify a webhook signature and parse the event.
    ///
    /// # Arguments
    ///
    /// * `payload` - Raw request body
    /// * `signature` - Value of the `Stripe-Signature` header
    /// * `secret` - Webhook signing secret
    pub fn construct_event(
        &self,
        payload: &RawPayload,
        signature: &str,
        secret: &str,
    ) -> Result<WebhookEvent, WebhookError> {
        webhook::construct_event(
            payload,
            signature,
            secret,
            self.webhook_tolerance,
            chrono::Utc::now().timestamp(),
        )
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StripeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StripeError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        let err = match error_body {
            Ok(stripe_error) => StripeError::Api {
                status,
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
                param: stripe_error.error.param,
            },
            Err(_) => StripeError::Api {
                status,
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
                param: None,
            },
        };

        tracing::warn!(status = %status, kind = ?err.kind(), error = %err, "Stripe request failed");
        Err(err)
    }
}
