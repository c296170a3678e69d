//! Payment gateway facade.
//!
//! [`PaymentGateway`] is built once from [`StripeConfig`] and handed to
//! whatever needs payment access. Whether it is configured is decided at
//! construction and never re-evaluated.

use std::sync::Arc;

use crate::client::StripeClient;
use crate::config::StripeConfig;
use crate::error::{
    GatewayError, ServiceError, StripeError, CHECKOUT_WITHOUT_URL, MISSING_API_KEY,
    MISSING_WEBHOOK_SECRET,
};
use crate::types::{CheckoutSession, Price, SessionCreateParams, Subscription, WebhookEvent};
use crate::webhook::RawPayload;

/// Stripe-backed payment gateway.
#[derive(Clone)]
pub struct PaymentGateway {
    client: Option<Arc<StripeClient>>,
    webhook_secret: Option<Arc<str>>,
}

impl std::fmt::Debug for PaymentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentGateway")
            .field("client", &self.client)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl PaymentGateway {
    /// Build the gateway from configuration.
    ///
    /// Without an API key the gateway is unconfigured and every operation
    /// fails with [`GatewayError::Configuration`].
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let client = StripeClient::from_config(config)
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    api_base_url = %config.api_base_url,
                    "Failed to build Stripe client"
                );
                e
            })?
            .map(Arc::new);

        if client.is_some() {
            tracing::info!(api_base_url = %config.api_base_url, "Stripe integration enabled");
        } else {
            tracing::warn!("Stripe not configured - payments will not be available");
        }
        if config.webhook_secret.is_none() {
            tracing::warn!("Stripe webhook secret not configured - webhooks will be rejected");
        }

        Ok(Self {
            client,
            webhook_secret: config.webhook_secret.as_deref().map(Arc::from),
        })
    }

    /// Build a gateway around an existing client.
    #[must_use]
    pub fn with_client(client: StripeClient, webhook_secret: Option<String>) -> Self {
        Self {
            client: Some(Arc::new(client)),
            webhook_secret: webhook_secret.map(Arc::from),
        }
    }

    /// A gateway with no Stripe access.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            client: None,
            webhook_secret: None,
        }
    }

    /// Check if an API key was configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// List prices by lookup key.
    pub async fn get_prices<S: AsRef<str>>(
        &self,
        lookup_keys: &[S],
    ) -> Result<Vec<Price>, GatewayError> {
        let list = self.client()?.list_prices(lookup_keys).await?;
        Ok(list.data)
    }

    /// Create a Checkout session and return its launch URL.
    pub async fn create_checkout(
        &self,
        params: &SessionCreateParams,
    ) -> Result<String, GatewayError> {
        let session = self.client()?.create_checkout_session(params).await?;

        match session.url {
            Some(url) => {
                tracing::info!(session_id = %session.id, "Checkout session created");
                Ok(url)
            }
            None => {
                tracing::error!(session_id = %session.id, "Checkout session has no URL");
                Err(ServiceError::internal(CHECKOUT_WITHOUT_URL).into())
            }
        }
    }

    /// Retrieve a Checkout session.
    pub async fn get_checkout(&self, session_id: &str) -> Result<CheckoutSession, GatewayError> {
        Ok(self.client()?.get_checkout_session(session_id).await?)
    }

    /// Retrieve a subscription.
    pub async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, GatewayError> {
        Ok(self.client()?.get_subscription(subscription_id).await?)
    }

    /// Verify a webhook signature and return the parsed event.
    ///
    /// # Arguments
    ///
    /// * `payload` - Exact request body as received
    /// * `signature` - Value of the `Stripe-Signature` header
    ///
    /// A missing API key is reported before a missing webhook secret.
    #[allow(clippy::unused_async)]
    pub async fn validate_and_get_event(
        &self,
        payload: &RawPayload,
        signature: &str,
    ) -> Result<WebhookEvent, GatewayError> {
        let client = self.client()?;

        let secret = self
            .webhook_secret
            .as_deref()
            .ok_or_else(|| ServiceError::internal(MISSING_WEBHOOK_SECRET))?;

        client
            .construct_event(payload, signature, secret)
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid Stripe webhook");
                GatewayError::from(ServiceError::internal(format!(
                    "Cannot validate webhook: {e}"
                )))
            })
    }

    fn client(&self) -> Result<&StripeClient, GatewayError> {
        self.client
            .as_deref()
            .ok_or_else(|| GatewayError::Configuration(MISSING_API_KEY.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_without_api_key() {
        let gateway = PaymentGateway::new(&StripeConfig::default()).unwrap();
        assert!(!gateway.is_configured());
    }

    #[test]
    fn configured_with_api_key() {
        let config = StripeConfig::default().with_api_key("sk_test_xxx");
        let gateway = PaymentGateway::new(&config).unwrap();
        assert!(gateway.is_configured());
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let config = StripeConfig::default()
            .with_api_key("sk_test_xxx")
            .with_api_base_url("not a url");
        let err = PaymentGateway::new(&config).unwrap_err();
        assert!(matches!(err, StripeError::Url(_)));
    }

    #[tokio::test]
    async fn webhook_fails_on_configuration_before_secret() {
        let gateway = PaymentGateway::unconfigured();
        let err = gateway
            .validate_and_get_event(&RawPayload::from("{}"), "t=1,v1=00")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
    }

    #[tokio::test]
    async fn webhook_without_secret_is_service_error() {
        let client = StripeClient::new("sk_test_xxx").unwrap();
        let gateway = PaymentGateway::with_client(client, None);

        let err = gateway
            .validate_and_get_event(&RawPayload::from("anything"), "garbage")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            err.to_string(),
            "Missing environment variable 'STRIPE_WEBHOOK_SECRET'."
        );
    }
}
