//! StoreConnect payment functions.
//!
//! Authenticated callable endpoints for the StoreConnect mobile app: the
//! caller's Firebase ID token is verified, a fixed subscription request is
//! built, and the configured provider returns either a Mercado Pago
//! preference ID or a Stripe payment intent client secret.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
