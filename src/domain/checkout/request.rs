//! The request-scoped payment shape handed to a provider adapter.

use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::domain::foundation::ValidationError;

/// One purchasable line on the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub title: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if quantity == 0 {
            return Err(ValidationError::invalid_format("quantity", "must be at least 1"));
        }
        Ok(Self {
            title,
            description: description.into(),
            quantity,
            unit_price,
        })
    }

    /// `unit_price * quantity`, or `None` on overflow.
    pub fn subtotal(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }
}

/// Where the hosted checkout sends the buyer back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

impl BackUrls {
    pub fn new(
        success: impl Into<String>,
        failure: impl Into<String>,
        pending: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let urls = Self {
            success: success.into(),
            failure: failure.into(),
            pending: pending.into(),
        };
        for (field, url) in [
            ("back_urls.success", &urls.success),
            ("back_urls.failure", &urls.failure),
            ("back_urls.pending", &urls.pending),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("'{}' is not an absolute http(s) URL", url),
                ));
            }
        }
        Ok(urls)
    }
}

/// When the hosted checkout redirects automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoReturn {
    /// Only after an approved payment.
    Approved,
    /// After any terminal outcome.
    All,
}

/// Fixed-shape payment request built per invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    items: Vec<LineItem>,
    back_urls: BackUrls,
    auto_return: Option<AutoReturn>,
    external_reference: Option<String>,
    total: Money,
}

impl PaymentRequest {
    /// Validates that the request is non-empty, single-currency, and that
    /// its total fits in an `i64`.
    pub fn new(
        items: Vec<LineItem>,
        back_urls: BackUrls,
        auto_return: Option<AutoReturn>,
    ) -> Result<Self, ValidationError> {
        let total = sum_subtotals(&items).ok_or_else(|| {
            if items.is_empty() {
                ValidationError::empty_field("items")
            } else {
                ValidationError::invalid_format(
                    "items",
                    "line items mix currencies or overflow the total",
                )
            }
        })?;
        Ok(Self {
            items,
            back_urls,
            auto_return,
            external_reference: None,
            total,
        })
    }

    /// Tags the request with a caller reference (the Firebase UID).
    pub fn with_external_reference(mut self, reference: impl Into<String>) -> Self {
        self.external_reference = Some(reference.into());
        self
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn back_urls(&self) -> &BackUrls {
        &self.back_urls
    }

    pub fn auto_return(&self) -> Option<AutoReturn> {
        self.auto_return
    }

    pub fn external_reference(&self) -> Option<&str> {
        self.external_reference.as_deref()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> &Money {
        &self.total
    }

    /// Short human-readable summary used as a charge description.
    pub fn description(&self) -> &str {
        &self.items[0].title
    }
}

fn sum_subtotals(items: &[LineItem]) -> Option<Money> {
    let mut lines = items.iter();
    let first = lines.next()?.subtotal()?;
    lines.try_fold(first, |acc, item| acc.checked_add(&item.subtotal()?))
}
