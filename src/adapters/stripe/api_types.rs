//! Stripe API objects the intent adapter reads.
//!
//! Only the fields we consume are modeled; unknown fields are ignored.

use serde::Deserialize;

/// A PaymentIntent as returned by `POST /v1/payment_intents`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// Intent ID (pi_...).
    pub id: String,

    /// Secret the mobile SDK uses to confirm the intent.
    #[serde(default)]
    pub client_secret: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// Amount in minor units.
    #[serde(default)]
    pub amount: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub livemode: bool,
}

/// Stripe's error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeApiError,
}

/// Body of a Stripe API error.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    /// Category, e.g. `invalid_request_error`, `card_error`, `api_error`.
    #[serde(rename = "type")]
    pub error_type: String,

    /// Machine-readable code, e.g. `amount_too_small`.
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    /// Parameter the error relates to.
    #[serde(default)]
    pub param: Option<String>,
}

impl StripeApiError {
    /// The most specific identifier available, for logs.
    pub fn provider_code(&self) -> &str {
        self.code.as_deref().unwrap_or(&self.error_type)
    }
}
