//! API handlers.

pub mod checkout;
pub mod health;
pub mod prices;
pub mod subscriptions;
pub mod webhooks;
