//! Stripe configuration.

use std::fmt;
use std::time::Duration;

/// Default Stripe API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com/v1";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Default maximum age of a webhook timestamp, in seconds.
pub const DEFAULT_WEBHOOK_TOLERANCE_SECONDS: u64 = 300;

/// Stripe configuration loaded once at process start.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (`sk_test_...` or `sk_live_...`).
    pub api_key: Option<String>,

    /// Webhook signing secret (`whsec_...`).
    pub webhook_secret: Option<String>,

    /// API base URL (default: `https://api.stripe.com/v1`).
    pub api_base_url: String,

    /// Per-request HTTP timeout.
    pub timeout: Duration,

    /// Maximum accepted age of a webhook timestamp. Zero disables the check.
    pub webhook_tolerance: Duration,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let seconds = |name: &str, default: u64| {
            var(name)
                .and_then(|s| s.trim().parse().ok())
                .map_or(Duration::from_secs(default), Duration::from_secs)
        };

        Self {
            api_key: var("STRIPE_API_KEY"),
            webhook_secret: var("STRIPE_WEBHOOK_SECRET"),
            api_base_url: var("STRIPE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.into()),
            timeout: seconds("STRIPE_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS),
            webhook_tolerance: seconds(
                "STRIPE_WEBHOOK_TOLERANCE_SECONDS",
                DEFAULT_WEBHOOK_TOLERANCE_SECONDS,
            ),
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the webhook signing secret.
    #[must_use]
    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    /// Point the client at a different API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Whether an API key is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            webhook_secret: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            webhook_tolerance: Duration::from_secs(DEFAULT_WEBHOOK_TOLERANCE_SECONDS),
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("StripeConfig")
            .field("api_key", &redact(&self.api_key))
            .field("webhook_secret", &redact(&self.webhook_secret))
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .field("webhook_tolerance", &self.webhook_tolerance)
            .finish()
    }
}
