//! Common test utilities for paygate integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum::Router;
use axum_test::TestServer;
use wiremock::MockServer;

use paygate_service::{create_router, AppState, ServiceConfig};
use paygate_stripe::StripeConfig;

/// Stripe test API key used by the harness.
pub const API_KEY: &str = "sk_test_xxx";

/// Webhook signing secret used by the harness.
pub const WEBHOOK_SECRET: &str = "whsec_test123secret456";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Simulated Stripe API (kept alive for test duration).
    pub stripe: MockServer,
}

impl TestHarness {
    /// Harness with Stripe fully configured against a mock API.
    pub async fn new() -> Self {
        let stripe = MockServer::start().await;
        let stripe_config = StripeConfig::default()
            .with_api_key(API_KEY)
            .with_webhook_secret(WEBHOOK_SECRET)
            .with_api_base_url(stripe.uri());
        Self::with_stripe_config(stripe, stripe_config)
    }

    /// Harness without any Stripe credentials.
    pub async fn unconfigured() -> Self {
        let stripe = MockServer::start().await;
        let stripe_config = StripeConfig::default().with_api_base_url(stripe.uri());
        Self::with_stripe_config(stripe, stripe_config)
    }

    /// Harness with an API key but no webhook secret.
    pub async fn without_webhook_secret() -> Self {
        let stripe = MockServer::start().await;
        let stripe_config = StripeConfig::default()
            .with_api_key(API_KEY)
            .with_api_base_url(stripe.uri());
        Self::with_stripe_config(stripe, stripe_config)
    }

    fn with_stripe_config(stripe: MockServer, stripe_config: StripeConfig) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            stripe: stripe_config,
        };

        let router: Router = create_router(AppState::new(config));
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, stripe }
    }
}
