//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use paygate_stripe::{GatewayError, StripeErrorKind};

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Too many requests to the payment provider.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Condition detected by the gateway, with its own status.
    #[error("{message}")]
    Service {
        /// HTTP status to answer with.
        status: StatusCode,
        /// Message for the caller.
        message: String,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// External service error.
    #[error("external service error: {0}")]
    ExternalService(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, "rate_limited", msg),
            Self::Service { status, message } => {
                if status.is_server_error() {
                    tracing::error!(status = %status, error = %message, "Payment service error");
                }
                (status, "service_error", message)
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            Self::ExternalService(msg) => {
                (StatusCode::BAD_GATEWAY, "external_service_error", msg)
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Configuration(msg) => Self::Internal(msg),
            GatewayError::Service(err) => Self::Service {
                status: err.status,
                message: err.message,
            },
            GatewayError::Provider(err) => {
                let message = err.to_string();
                match err.kind() {
                    StripeErrorKind::NotFound => Self::NotFound(message),
                    StripeErrorKind::InvalidRequest
                    | StripeErrorKind::Card
                    | StripeErrorKind::Idempotency => Self::BadRequest(message),
                    StripeErrorKind::RateLimited => Self::RateLimited(message),
                    StripeErrorKind::Authentication
                    | StripeErrorKind::Permission
                    | StripeErrorKind::Api
                    | StripeErrorKind::Network
                    | StripeErrorKind::Decode => Self::ExternalService(message),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_stripe::ServiceError;

    #[test]
    fn configuration_is_internal() {
        let err = ApiError::from(GatewayError::Configuration("missing key".into()));
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn service_error_keeps_status_and_message() {
        let err = ApiError::from(GatewayError::from(ServiceError::internal(
            "Cannot create checkout session",
        )));
        match &err {
            ApiError::Service { status, message } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "Cannot create checkout session");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn service_error_status_reaches_response() {
        let err = ApiError::from(GatewayError::from(ServiceError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "try later",
        )));
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
