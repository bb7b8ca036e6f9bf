//! Stripe payment intent adapter.
//!
//! Implements `PaymentProvider` by creating a PaymentIntent and handing its
//! `client_secret` back to the mobile client, which confirms the payment
//! with the Stripe SDK.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(secret_key);
//! let adapter = StripeIntentAdapter::new(config, http_client);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::checkout::{PaymentRequest, PaymentResult, ProviderVariant};
use crate::ports::{PaymentError, PaymentProvider};

use super::api_types::{StripeErrorEnvelope, StripePaymentIntent};

pub const STRIPE_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    secret_key: SecretString,

    /// Base URL for the Stripe API.
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_base_url: STRIPE_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn is_test_mode(&self) -> bool {
        self.secret_key.expose_secret().starts_with("sk_test_")
    }
}

/// Intent-based payment provider over the Stripe REST API.
pub struct StripeIntentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeIntentAdapter {
    pub fn new(config: StripeConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Form fields for `POST /v1/payment_intents`.
    fn intent_params(request: &PaymentRequest) -> Vec<(&'static str, String)> {
        let total = request.total();
        let mut params = vec![
            ("amount", total.amount_minor().to_string()),
            ("currency", total.currency().to_lowercase()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
            ("description", request.description().to_string()),
        ];

        if let Some(reference) = request.external_reference() {
            params.push(("metadata[firebase_uid]", reference.to_string()));
        }

        params
    }

    async fn error_from_response(response: reqwest::Response) -> PaymentError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<StripeErrorEnvelope>(&body) {
            Ok(envelope) => {
                let message = envelope
                    .error
                    .message
                    .clone()
                    .unwrap_or_else(|| envelope.error.error_type.clone());
                PaymentError::from_status(status, format!("Stripe API error: {}", message))
                    .with_provider_code(envelope.error.provider_code())
            }
            Err(_) => PaymentError::from_status(status, format!("Stripe API error: {}", body)),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeIntentAdapter {
    fn variant(&self) -> ProviderVariant {
        ProviderVariant::Stripe
    }

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let idempotency_key = uuid::Uuid::new_v4().to_string();

        tracing::debug!(
            amount = request.total().amount_minor(),
            currency = %request.total().currency(),
            idempotency_key = %idempotency_key,
            "creating Stripe payment intent"
        );

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .header("Idempotency-Key", &idempotency_key)
            .form(&Self::intent_params(request))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::invalid_response(format!("Failed to parse Stripe response: {}", e))
        })?;

        let client_secret = intent
            .client_secret
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                PaymentError::invalid_response(format!(
                    "Stripe payment intent {} has no client_secret",
                    intent.id
                ))
            })?;

        tracing::debug!(
            intent_id = %intent.id,
            status = intent.status.as_deref().unwrap_or("unknown"),
            livemode = intent.livemode,
            "Stripe payment intent created"
        );

        Ok(PaymentResult::client_secret(client_secret))
    }
}
