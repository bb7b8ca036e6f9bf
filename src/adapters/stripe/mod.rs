//! Stripe payment provider adapter (intent-based variant).
//!
//! Creates a PaymentIntent for the request total with automatic payment
//! methods enabled and returns its `client_secret`.
//!
//! # Security
//!
//! - The secret key is held as `secrecy::SecretString` and only exposed
//!   when building the basic-auth header
//! - Stripe error bodies are logged by the caller, never returned to clients
//!
//! # Configuration
//!
//! - `STORECONNECT__PAYMENT__STRIPE_SECRET_KEY`: Stripe secret API key

mod api_types;
mod intent_adapter;

pub use api_types::{StripeApiError, StripeErrorEnvelope, StripePaymentIntent};
pub use intent_adapter::{StripeConfig, StripeIntentAdapter, STRIPE_API_BASE_URL};
