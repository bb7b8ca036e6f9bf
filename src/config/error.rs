//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid provider timeout")]
    InvalidProviderTimeout,

    #[error("Request timeout {request_secs}s must exceed 2x provider timeout {provider_secs}s")]
    RequestTimeoutTooShort { request_secs: u64, provider_secs: u64 },

    #[error("Invalid Mercado Pago access token format")]
    InvalidMercadoPagoToken,

    #[error("Invalid Stripe secret key format")]
    InvalidStripeKey,

    #[error("Test credentials are not allowed in production")]
    TestCredentialsInProduction,
}
