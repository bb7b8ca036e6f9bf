//! Mercado Pago Checkout Pro wire types.
//!
//! Request bodies borrow from the domain `PaymentRequest`; responses model
//! only the fields the adapter reads.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::{AutoReturn, BackUrls, LineItem, PaymentRequest};

/// Body of `POST /checkout/preferences`.
#[derive(Debug, Serialize)]
pub struct PreferenceBody<'a> {
    pub items: Vec<PreferenceItem<'a>>,
    pub back_urls: PreferenceBackUrls<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_return: Option<AutoReturn>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<&'a str>,
}

impl<'a> From<&'a PaymentRequest> for PreferenceBody<'a> {
    fn from(request: &'a PaymentRequest) -> Self {
        Self {
            items: request.items().iter().map(PreferenceItem::from).collect(),
            back_urls: PreferenceBackUrls::from(request.back_urls()),
            auto_return: request.auto_return(),
            external_reference: request.external_reference(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreferenceItem<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub quantity: u32,
    pub currency_id: &'a str,
    /// Major units; Mercado Pago takes a decimal price.
    pub unit_price: f64,
}

impl<'a> From<&'a LineItem> for PreferenceItem<'a> {
    fn from(item: &'a LineItem) -> Self {
        Self {
            title: &item.title,
            description: &item.description,
            quantity: item.quantity,
            currency_id: item.unit_price.currency().as_str(),
            unit_price: item.unit_price.to_major_units(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreferenceBackUrls<'a> {
    pub success: &'a str,
    pub failure: &'a str,
    pub pending: &'a str,
}

impl<'a> From<&'a BackUrls> for PreferenceBackUrls<'a> {
    fn from(urls: &'a BackUrls) -> Self {
        Self {
            success: &urls.success,
            failure: &urls.failure,
            pending: &urls.pending,
        }
    }
}

/// Created preference. `id` is what the mobile SDK opens checkout with.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub init_point: Option<String>,

    #[serde(default)]
    pub sandbox_init_point: Option<String>,
}

/// Mercado Pago error body:
/// `{"message", "error", "status", "cause": [{"code", "description"}]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MercadoPagoErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    /// Short category, e.g. `bad_request`, `unauthorized`.
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub cause: Vec<MercadoPagoCause>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MercadoPagoCause {
    /// Numeric or string depending on the endpoint.
    #[serde(default)]
    pub code: Option<serde_json::Value>,

    #[serde(default)]
    pub description: Option<String>,
}

impl MercadoPagoErrorBody {
    /// First cause code if present, else the error category.
    pub fn provider_code(&self) -> Option<String> {
        self.cause
            .iter()
            .find_map(|cause| match &cause.code {
                Some(serde_json::Value::String(code)) => Some(code.clone()),
                Some(serde_json::Value::Number(code)) => Some(code.to_string()),
                _ => None,
            })
            .or_else(|| self.error.clone())
    }

    pub fn describe(&self) -> String {
        let mut text = self
            .message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "unknown error".to_string());
        for cause in &self.cause {
            if let Some(description) = &cause.description {
                text.push_str("; ");
                text.push_str(description);
            }
        }
        text
    }
}
