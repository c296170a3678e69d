//! Application state.

use paygate_stripe::PaymentGateway;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Stripe payment gateway (possibly unconfigured).
    pub gateway: PaymentGateway,
}

impl AppState {
    /// Create a new application state.
    ///
    /// A gateway that fails to build is logged and replaced by an
    /// unconfigured one, so the service still starts.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let gateway = PaymentGateway::new(&config.stripe).unwrap_or_else(|e| {
            tracing::error!(
                error = %e,
                "Failed to create Stripe client - payments disabled despite configured API key"
            );
            PaymentGateway::unconfigured()
        });

        Self { config, gateway }
    }

    /// Check if Stripe is configured.
    #[must_use]
    pub fn has_stripe(&self) -> bool {
        self.gateway.is_configured()
    }
}
