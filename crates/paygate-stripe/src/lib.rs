//! Stripe payment gateway adapter.
//!
//! This crate is a thin layer between an application backend and the Stripe API.
//! It covers five operations:
//!
//! - Listing prices by lookup key
//! - Creating a Checkout session and returning its launch URL
//! - Retrieving Checkout sessions and subscriptions
//! - Verifying webhook signatures and parsing the event payload
//!
//! # Example
//!
//! ```no_run
//! use paygate_stripe::{PaymentGateway, StripeConfig};
//!
//! # async fn example() -> Result<(), paygate_stripe::GatewayError> {
//! let gateway = PaymentGateway::new(&StripeConfig::from_env())?;
//!
//! let prices = gateway.get_prices(&["pro_monthly", "pro_yearly"]).await?;
//! for price in &prices {
//!     println!("{} ({:?})", price.id, price.price_type);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod gateway;
pub mod types;
pub mod webhook;

pub use client::StripeClient;
pub use config::StripeConfig;
pub use error::{GatewayError, ServiceError, StripeError, StripeErrorKind, WebhookError};
pub use gateway::PaymentGateway;
pub use types::*;
pub use webhook::{signature_header, RawPayload};
