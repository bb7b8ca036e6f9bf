//! Mercado Pago payment provider adapter (preference-based variant).
//!
//! Creates a Checkout Pro preference for the request's line items and
//! returns the preference ID.
//!
//! # Configuration
//!
//! - `STORECONNECT__PAYMENT__MERCADOPAGO_ACCESS_TOKEN`: account access token

mod api_types;
mod preference_adapter;

pub use api_types::{MercadoPagoErrorBody, PreferenceBody, PreferenceResponse};
pub use preference_adapter::{
    MercadoPagoConfig, MercadoPagoPreferenceAdapter, MERCADOPAGO_API_BASE_URL,
};
