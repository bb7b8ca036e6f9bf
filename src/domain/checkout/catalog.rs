//! Business constants for the StoreConnect subscription checkout.

use super::money::{CurrencyCode, Money};
use super::request::{AutoReturn, BackUrls, LineItem, PaymentRequest};
use crate::domain::foundation::ValidationError;

pub const SUBSCRIPTION_TITLE: &str = "Assinatura Mensal StoreConnect";
pub const SUBSCRIPTION_DESCRIPTION: &str = "Acesso completo à plataforma.";
pub const SUBSCRIPTION_QUANTITY: u32 = 1;
pub const SUBSCRIPTION_CURRENCY: &str = "BRL";
/// R$ 50,00 in centavos.
pub const SUBSCRIPTION_PRICE_MINOR: i64 = 5000;

pub const BACK_URL_SUCCESS: &str = "https://seusite.com/success";
pub const BACK_URL_FAILURE: &str = "https://seusite.com/failure";
pub const BACK_URL_PENDING: &str = "https://seusite.com/pending";

/// Builds the monthly subscription request, fresh for each invocation.
pub fn subscription_request() -> Result<PaymentRequest, ValidationError> {
    let price = Money::new(
        SUBSCRIPTION_PRICE_MINOR,
        CurrencyCode::new(SUBSCRIPTION_CURRENCY)?,
    )?;
    let item = LineItem::new(
        SUBSCRIPTION_TITLE,
        SUBSCRIPTION_DESCRIPTION,
        SUBSCRIPTION_QUANTITY,
        price,
    )?;
    let back_urls = BackUrls::new(BACK_URL_SUCCESS, BACK_URL_FAILURE, BACK_URL_PENDING)?;

    PaymentRequest::new(vec![item], back_urls, Some(AutoReturn::Approved))
}
