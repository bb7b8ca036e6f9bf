//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `STORECONNECT` prefix
//! and `__` separates nested values.
//!
//! # Example
//!
//! ```no_run
//! use storeconnect_functions::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving {}", config.payment.provider.function_name());
//! ```

mod auth;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "STORECONNECT";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication configuration (Firebase project)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Payment configuration (provider selection and credentials)
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `STORECONNECT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `STORECONNECT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `STORECONNECT__PAYMENT__PROVIDER=stripe` -> `payment.provider = stripe`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The request timeout must leave room for two outbound calls on the
    /// shared client (signing keys, then the provider).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate()?;
        self.payment.validate(&self.server.environment)?;

        let request_secs = self.server.request_timeout_secs;
        let provider_secs = self.payment.provider_timeout_secs;
        if request_secs <= provider_secs.saturating_mul(2) {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs,
                provider_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
