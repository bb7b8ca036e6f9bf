//! Payment provider port for creating checkout objects at a provider.
//!
//! One deployment wires exactly one implementation: the Mercado Pago
//! adapter (preference-based) or the Stripe adapter (intent-based). Both
//! take the same [`PaymentRequest`] and return the single field the mobile
//! client needs.
//!
//! # Design
//!
//! - **Single call**: one outbound request per invocation, no retries
//! - **Stateless**: adapters hold only configuration and an HTTP client
//! - **Detailed errors**: `PaymentError` keeps everything operators need;
//!   callers never see it

use async_trait::async_trait;
use std::fmt;

use crate::domain::checkout::{PaymentRequest, PaymentResult, ProviderVariant};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Which variant this adapter implements.
    fn variant(&self) -> ProviderVariant;

    /// Create the provider-side payment object for `request`.
    ///
    /// Returns `PaymentResult::Preference` for preference-based providers
    /// and `PaymentResult::ClientSecret` for intent-based ones.
    async fn create_payment(&self, request: &PaymentRequest)
        -> Result<PaymentResult, PaymentError>;
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Operator-facing detail.
    pub message: String,

    /// Provider's own error code, if it sent one.
    pub provider_code: Option<String>,

    /// HTTP status returned by the provider, if a response arrived.
    pub http_status: Option<u16>,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            http_status: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Transport failure before any response arrived.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// The provider answered but the body was not what we expected.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidResponse, message)
    }

    /// Classifies a non-2xx provider response by its HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::from_http_status(status), message).with_http_status(status)
    }
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(status) = self.http_status {
            write!(f, " (http {})", status)?;
        }
        if let Some(code) = &self.provider_code {
            write!(f, " [{}]", code)?;
        }
        Ok(())
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    /// Network connectivity issue or timeout.
    NetworkError,

    /// The provider rejected our credential.
    AuthenticationError,

    /// The provider rejected the request body.
    InvalidRequest,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider-side failure (5xx or unclassified).
    ProviderError,

    /// Response could not be parsed or lacked the expected field.
    InvalidResponse,
}

impl PaymentErrorCode {
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 | 403 => PaymentErrorCode::AuthenticationError,
            400 | 402 | 404 | 409 | 422 => PaymentErrorCode::InvalidRequest,
            429 => PaymentErrorCode::RateLimitExceeded,
            _ => PaymentErrorCode::ProviderError,
        }
    }
}

impl fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::InvalidResponse => "invalid_response",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn PaymentProvider) {}
    }

    #[test]
    fn status_codes_classify_errors() {
        assert_eq!(
            PaymentErrorCode::from_http_status(401),
            PaymentErrorCode::AuthenticationError
        );
        assert_eq!(
            PaymentErrorCode::from_http_status(400),
            PaymentErrorCode::InvalidRequest
        );
        assert_eq!(
            PaymentErrorCode::from_http_status(429),
            PaymentErrorCode::RateLimitExceeded
        );
        assert_eq!(
            PaymentErrorCode::from_http_status(503),
            PaymentErrorCode::ProviderError
        );
    }

    #[test]
    fn payment_error_display_includes_all_detail() {
        let err = PaymentError::from_status(400, "invalid unit_price")
            .with_provider_code("invalid_items");
        let shown = err.to_string();
        assert!(shown.contains("invalid_request"));
        assert!(shown.contains("invalid unit_price"));
        assert!(shown.contains("http 400"));
        assert!(shown.contains("[invalid_items]"));
    }

    #[test]
    fn network_error_has_no_status() {
        let err = PaymentError::network("connection refused");
        assert_eq!(err.code, PaymentErrorCode::NetworkError);
        assert!(err.http_status.is_none());
    }
}
