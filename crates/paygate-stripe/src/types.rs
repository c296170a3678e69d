//! Stripe API types.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Stripe price object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Price ID.
    pub id: String,
    /// One-time or recurring.
    #[serde(rename = "type")]
    pub price_type: PriceType,
    /// Lookup key the price was fetched by.
    #[serde(default)]
    pub lookup_key: Option<String>,
    /// Currency (e.g., "usd").
    #[serde(default)]
    pub currency: Option<String>,
    /// Unit amount in the currency's minor unit.
    #[serde(default)]
    pub unit_amount: Option<i64>,
    /// Whether the price can be used for new purchases.
    #[serde(default)]
    pub active: bool,
    /// Product ID.
    #[serde(default)]
    pub product: Option<String>,
    /// Billing interval for recurring prices.
    #[serde(default)]
    pub recurring: Option<Recurring>,
}

/// Price type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// Charged once.
    OneTime,
    /// Charged on an interval.
    Recurring,
}

/// Recurring billing settings of a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurring {
    /// `day`, `week`, `month` or `year`.
    pub interval: String,
    /// Number of intervals between charges.
    #[serde(default = "default_interval_count")]
    pub interval_count: u32,
}

fn default_interval_count() -> u32 {
    1
}

/// Stripe sends `null` for some maps it documents as objects.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stripe Checkout session object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Session ID.
    pub id: String,
    /// Checkout URL to redirect the user to.
    #[serde(default)]
    pub url: Option<String>,
    /// Session mode.
    #[serde(default)]
    pub mode: Option<CheckoutMode>,
    /// Session status (`open`, `complete`, `expired`).
    #[serde(default)]
    pub status: Option<String>,
    /// Payment status.
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Customer ID.
    #[serde(default)]
    pub customer: Option<String>,
    /// Customer email.
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Subscription created by the session, if any.
    #[serde(default)]
    pub subscription: Option<String>,
    /// Client reference ID.
    #[serde(default)]
    pub client_reference_id: Option<String>,
    /// Total amount in the currency's minor unit.
    #[serde(default)]
    pub amount_total: Option<i64>,
    /// Currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Expiry timestamp (Unix).
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Metadata.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// Checkout session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment.
    Payment,
    /// Start a subscription.
    Subscription,
    /// Save payment details for later.
    Setup,
}

impl CheckoutMode {
    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Subscription => "subscription",
            Self::Setup => "setup",
        }
    }
}

/// Parameters for creating a Checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCreateParams {
    /// Session mode.
    pub mode: CheckoutMode,
    /// URL to redirect to on success.
    pub success_url: String,
    /// URL to redirect to on cancel.
    #[serde(default)]
    pub cancel_url: Option<String>,
    /// Items being purchased.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Existing customer ID.
    #[serde(default)]
    pub customer: Option<String>,
    /// Prefilled email for new customers.
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Caller's reference (e.g., internal user ID).
    #[serde(default)]
    pub client_reference_id: Option<String>,
    /// Whether promotion codes can be entered.
    #[serde(default)]
    pub allow_promotion_codes: Option<bool>,
    /// Metadata attached to the session.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Metadata attached to the created subscription.
    #[serde(default)]
    pub subscription_metadata: BTreeMap<String, String>,
}

/// Checkout line item referencing an existing price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Price ID.
    pub price: String,
    /// Quantity.
    pub quantity: u64,
}

impl SessionCreateParams {
    /// Create parameters with the required fields.
    #[must_use]
    pub fn new(mode: CheckoutMode, success_url: impl Into<String>) -> Self {
        Self {
            mode,
            success_url: success_url.into(),
            cancel_url: None,
            line_items: Vec::new(),
            customer: None,
            customer_email: None,
            client_reference_id: None,
            allow_promotion_codes: None,
            metadata: BTreeMap::new(),
            subscription_metadata: BTreeMap::new(),
        }
    }

    /// Add a line item.
    #[must_use]
    pub fn line_item(mut self, price: impl Into<String>, quantity: u64) -> Self {
        self.line_items.push(LineItem {
            price: price.into(),
            quantity,
        });
        self
    }

    /// Encode as Stripe form parameters.
    ///
    /// Nested values use bracket keys, e.g. `line_items[0][price]`.
    #[must_use]
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("mode".to_string(), self.mode.as_str().to_string()),
            ("success_url".to_string(), self.success_url.clone()),
        ];

        let optional = [
            ("cancel_url", &self.cancel_url),
            ("customer", &self.customer),
            ("customer_email", &self.customer_email),
            ("client_reference_id", &self.client_reference_id),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.push((key.to_string(), value.clone()));
            }
        }

        if let Some(allow) = self.allow_promotion_codes {
            params.push(("allow_promotion_codes".to_string(), allow.to_string()));
        }

        for (i, item) in self.line_items.iter().enumerate() {
            params.push((format!("line_items[{i}][price]"), item.price.clone()));
            params.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
        }

        for (key, value) in &self.metadata {
            params.push((format!("metadata[{key}]"), value.clone()));
        }
        for (key, value) in &self.subscription_metadata {
            params.push((format!("subscription_data[metadata][{key}]"), value.clone()));
        }

        params
    }
}

/// Stripe subscription object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: String,
    /// Subscription status.
    pub status: SubscriptionStatus,
    /// Customer ID.
    #[serde(default)]
    pub customer: Option<String>,
    /// Whether the subscription ends at the current period end.
    #[serde(default)]
    pub cancel_at_period_end: bool,
    /// Current period start (Unix).
    #[serde(default)]
    pub current_period_start: Option<i64>,
    /// Current period end (Unix).
    #[serde(default)]
    pub current_period_end: Option<i64>,
    /// Cancellation timestamp (Unix).
    #[serde(default)]
    pub canceled_at: Option<i64>,
    /// Subscription items.
    #[serde(default)]
    pub items: Option<StripeList<SubscriptionItem>>,
    /// Metadata.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// Subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In trial.
    Trialing,
    /// Paid and running.
    Active,
    /// First payment not yet made.
    Incomplete,
    /// First payment never made.
    IncompleteExpired,
    /// Latest payment failed, retries pending.
    PastDue,
    /// Retries exhausted, left open.
    Unpaid,
    /// Ended.
    Canceled,
    /// Collection paused.
    Paused,
    /// Status not known to this crate.
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Whether the subscription currently grants access.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active | Self::Trialing)
    }
}

/// Item of a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    /// Item ID.
    pub id: String,
    /// Price being billed.
    pub price: Price,
    /// Quantity.
    #[serde(default)]
    pub quantity: Option<u64>,
}

/// Stripe customer object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Stripe customer ID.
    pub id: String,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
    /// Customer name.
    #[serde(default)]
    pub name: Option<String>,
    /// Metadata attached to the customer.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: BTreeMap<String, String>,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
}

/// Stripe invoice object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: String,
    /// Customer ID.
    #[serde(default)]
    pub customer: Option<String>,
    /// Subscription ID.
    #[serde(default)]
    pub subscription: Option<String>,
    /// Invoice status (`draft`, `open`, `paid`, `uncollectible`, `void`).
    #[serde(default)]
    pub status: Option<String>,
    /// Amount due in the currency's minor unit.
    #[serde(default)]
    pub amount_due: i64,
    /// Amount paid in the currency's minor unit.
    #[serde(default)]
    pub amount_paid: i64,
    /// Currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Hosted invoice page.
    #[serde(default)]
    pub hosted_invoice_url: Option<String>,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
}

/// Stripe list response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripeList<T> {
    /// Object type (always "list").
    #[serde(default)]
    pub object: String,
    /// Data items.
    pub data: Vec<T>,
    /// Whether there are more items.
    #[serde(default)]
    pub has_more: bool,
    /// URL for the list endpoint.
    #[serde(default)]
    pub url: Option<String>,
}

/// Stripe webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID.
    pub id: String,
    /// Event type (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event data.
    pub data: WebhookEventData,
    /// Created timestamp (Unix).
    pub created: i64,
    /// Whether the event came from live mode.
    #[serde(default)]
    pub livemode: bool,
    /// API version used to render the event.
    #[serde(default)]
    pub api_version: Option<String>,
}

/// Webhook event data container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEventData {
    /// The event object.
    pub object: serde_json::Value,
    /// Changed fields for `*.updated` events.
    #[serde(default)]
    pub previous_attributes: Option<serde_json::Value>,
}

impl WebhookEvent {
    /// Deserialize the embedded object into a typed shape.
    ///
    /// ```
    /// # use paygate_stripe::{CheckoutSession, WebhookEvent};
    /// let event: WebhookEvent = serde_json::from_str(
    ///     r#"{"id":"evt_1","type":"checkout.session.completed","created":1,
    ///         "data":{"object":{"id":"cs_1","url":null}}}"#,
    /// ).unwrap();
    /// let session: CheckoutSession = event.object_as().unwrap();
    /// assert_eq!(session.id, "cs_1");
    /// ```
    pub fn object_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data.object)
    }
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Parameter that caused the error.
    #[serde(default)]
    pub param: Option<String>,
}
