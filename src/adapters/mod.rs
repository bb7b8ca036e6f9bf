//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Firebase ID-token validation
//! - `mercadopago` - preference-based payment provider
//! - `stripe` - intent-based payment provider
//! - `http` - axum routes, DTOs and middleware
//! - `http_client` - the shared outbound `reqwest` client

pub mod auth;
pub mod http;
pub mod http_client;
pub mod mercadopago;
pub mod mock_provider;
pub mod stripe;

pub use http_client::shared_client;
pub use mock_provider::MockPaymentProvider;
