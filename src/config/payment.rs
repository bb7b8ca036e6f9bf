//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::checkout::ProviderVariant;

/// Payment configuration (Mercado Pago or Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Which provider this deployment talks to
    pub provider: ProviderVariant,

    /// Mercado Pago access token (required for `mercadopago`)
    #[serde(default)]
    pub mercadopago_access_token: Option<SecretString>,

    /// Stripe secret key (required for `stripe`)
    #[serde(default)]
    pub stripe_secret_key: Option<SecretString>,

    /// Outbound provider call timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

impl PaymentConfig {
    pub fn new(provider: ProviderVariant) -> Self {
        Self {
            provider,
            mercadopago_access_token: None,
            stripe_secret_key: None,
            provider_timeout_secs: default_provider_timeout(),
        }
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// The credential for the selected provider, if set and non-empty.
    pub fn active_credential(&self) -> Option<&SecretString> {
        let secret = match self.provider {
            ProviderVariant::MercadoPago => self.mercadopago_access_token.as_ref(),
            ProviderVariant::Stripe => self.stripe_secret_key.as_ref(),
        };
        secret.filter(|s| !s.expose_secret().trim().is_empty())
    }

    /// Check if the active credential is a sandbox/test credential
    pub fn is_test_mode(&self) -> bool {
        self.active_credential().is_some_and(|secret| {
            let secret = secret.expose_secret();
            match self.provider {
                ProviderVariant::MercadoPago => secret.starts_with("TEST-"),
                ProviderVariant::Stripe => secret.starts_with("sk_test_"),
            }
        })
    }

    /// Validate payment configuration
    ///
    /// Only the selected provider's credential is checked; the other may be
    /// absent.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = match (self.provider, self.active_credential()) {
            (ProviderVariant::MercadoPago, None) => {
                return Err(ValidationError::MissingRequired("MERCADOPAGO_ACCESS_TOKEN"))
            }
            (ProviderVariant::Stripe, None) => {
                return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"))
            }
            (_, Some(secret)) => secret.expose_secret(),
        };

        // Verify key prefixes for safety
        match self.provider {
            ProviderVariant::MercadoPago => {
                if !(secret.starts_with("TEST-") || secret.starts_with("APP_USR-")) {
                    return Err(ValidationError::InvalidMercadoPagoToken);
                }
            }
            ProviderVariant::Stripe => {
                if !secret.starts_with("sk_") {
                    return Err(ValidationError::InvalidStripeKey);
                }
            }
        }

        if *environment == Environment::Production && self.is_test_mode() {
            return Err(ValidationError::TestCredentialsInProduction);
        }

        if self.provider_timeout_secs == 0 || self.provider_timeout_secs > 60 {
            return Err(ValidationError::InvalidProviderTimeout);
        }

        Ok(())
    }
}

fn default_provider_timeout() -> u64 {
    10
}
