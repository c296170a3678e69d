//! Paygate HTTP API Service.
//!
//! This crate exposes the Stripe payment gateway over HTTP:
//!
//! - Price lookup by lookup key
//! - Checkout session creation and retrieval
//! - Subscription retrieval
//! - Stripe webhook verification
//!
//! Stripe credentials are read once at start-up. Without `STRIPE_API_KEY`
//! every payment route answers with a configuration error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
