//! Error types for the payment gateway.

use reqwest::StatusCode;

/// Message returned when the gateway has no API key.
pub const MISSING_API_KEY: &str = "Stripe config missing from environment 'STRIPE_API_KEY'.";

/// Message returned when webhook validation is attempted without a signing secret.
pub const MISSING_WEBHOOK_SECRET: &str = "Missing environment variable 'STRIPE_WEBHOOK_SECRET'.";

/// Message returned when Stripe creates a session without a launch URL.
pub const CHECKOUT_WITHOUT_URL: &str = "Cannot create checkout session";

/// Errors raised by [`crate::PaymentGateway`] operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The gateway was built without an API key.
    #[error("{0}")]
    Configuration(String),

    /// A condition the gateway detected itself.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Stripe call failed.
    #[error(transparent)]
    Provider(#[from] StripeError),
}

impl GatewayError {
    /// HTTP status for status-coded errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service(err) => Some(err.status),
            Self::Configuration(_) | Self::Provider(_) => None,
        }
    }
}

/// Status-coded error with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    /// HTTP-equivalent status.
    pub status: StatusCode,
    /// Message for the caller.
    pub message: String,
}

impl ServiceError {
    /// Create a new service error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Create a 500 service error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// Error type (`invalid_request_error`, `card_error`, ...).
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
        /// Parameter that caused the error.
        param: Option<String>,
    },

    /// Response body did not have the expected shape.
    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(String),
}

/// Category of a Stripe failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeErrorKind {
    /// Invalid or revoked API key.
    Authentication,
    /// Key lacks permission for the resource.
    Permission,
    /// Too many requests.
    RateLimited,
    /// Resource does not exist.
    NotFound,
    /// Rejected parameters.
    InvalidRequest,
    /// Card declined or similar payment failure.
    Card,
    /// Idempotency key reused with different parameters.
    Idempotency,
    /// Stripe-side failure.
    Api,
    /// Connection failure or timeout.
    Network,
    /// Unexpected response body.
    Decode,
}

impl StripeError {
    /// Classify the failure.
    #[must_use]
    pub fn kind(&self) -> StripeErrorKind {
        match self {
            Self::Http(err) if err.is_decode() => StripeErrorKind::Decode,
            Self::Http(_) | Self::Url(_) => StripeErrorKind::Network,
            Self::Decode(_) => StripeErrorKind::Decode,
            Self::Api {
                status, error_type, ..
            } => match *status {
                StatusCode::UNAUTHORIZED => StripeErrorKind::Authentication,
                StatusCode::FORBIDDEN => StripeErrorKind::Permission,
                StatusCode::TOO_MANY_REQUESTS => StripeErrorKind::RateLimited,
                StatusCode::NOT_FOUND => StripeErrorKind::NotFound,
                StatusCode::PAYMENT_REQUIRED => StripeErrorKind::Card,
                StatusCode::CONFLICT => StripeErrorKind::Idempotency,
                StatusCode::BAD_REQUEST => match error_type.as_str() {
                    "card_error" => StripeErrorKind::Card,
                    "idempotency_error" => StripeErrorKind::Idempotency,
                    _ => StripeErrorKind::InvalidRequest,
                },
                _ => match error_type.as_str() {
                    "authentication_error" => StripeErrorKind::Authentication,
                    "rate_limit_error" => StripeErrorKind::RateLimited,
                    "card_error" => StripeErrorKind::Card,
                    "invalid_request_error" => StripeErrorKind::InvalidRequest,
                    _ => StripeErrorKind::Api,
                },
            },
        }
    }
}

/// Webhook verification failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    /// Signature header has no timestamp or the timestamp is not a number.
    #[error("unable to extract timestamp and signatures from header")]
    MalformedHeader,

    /// Header carries no `v1` signature.
    #[error("no signatures found with expected scheme")]
    NoSignatures,

    /// No signature matched the payload.
    #[error("no signatures found matching the expected signature for payload")]
    SignatureMismatch,

    /// Timestamp is older than the configured tolerance.
    #[error("timestamp outside the tolerance zone (age {age_seconds}s)")]
    TimestampOutsideTolerance {
        /// Age of the signed timestamp in seconds.
        age_seconds: i64,
    },

    /// Verified body is not a valid event.
    #[error("invalid event payload: {0}")]
    InvalidPayload(String),
}
