//! Mock payment provider for testing.
//!
//! Configurable `PaymentProvider` for unit and integration tests. Supports:
//! - Pre-configured results
//! - Error injection
//! - Artificial latency
//! - Call tracking

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::checkout::{PaymentRequest, PaymentResult, ProviderVariant};
use crate::ports::{PaymentError, PaymentProvider};

/// Mock payment provider.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::returning(PaymentResult::preference("PREF-123"));
/// mock.set_error(PaymentError::network("connection reset"));
/// assert_eq!(mock.call_count(), 0);
/// ```
pub struct MockPaymentProvider {
    variant: ProviderVariant,
    inner: Arc<Mutex<MockState>>,
}

struct MockState {
    result: PaymentResult,
    /// Wins over `result` while set.
    error: Option<PaymentError>,
    delay: Option<Duration>,
    call_log: Vec<PaymentRequest>,
}

impl MockPaymentProvider {
    /// A mock of `variant` that succeeds with a placeholder value.
    pub fn new(variant: ProviderVariant) -> Self {
        let result = match variant {
            ProviderVariant::MercadoPago => PaymentResult::preference("PREF-mock"),
            ProviderVariant::Stripe => PaymentResult::client_secret("pi_mock_secret_mock"),
        };
        Self::returning(result)
    }

    /// A mock that always returns `result`; the variant follows the result.
    pub fn returning(result: PaymentResult) -> Self {
        Self {
            variant: result.variant(),
            inner: Arc::new(Mutex::new(MockState {
                result,
                error: None,
                delay: None,
                call_log: Vec::new(),
            })),
        }
    }

    /// A mock of `variant` that always fails with `error`.
    pub fn failing(variant: ProviderVariant, error: PaymentError) -> Self {
        let mock = Self::new(variant);
        mock.set_error(error);
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration
    // ════════════════════════════════════════════════════════════════════════════

    /// Replaces the success value. Must match the mock's variant.
    pub fn set_result(&self, result: PaymentResult) {
        debug_assert_eq!(result.variant(), self.variant);
        self.state().result = result;
    }

    pub fn set_error(&self, error: PaymentError) {
        self.state().error = Some(error);
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }

    /// Every call sleeps this long before answering.
    pub fn set_delay(&self, delay: Duration) {
        self.state().delay = Some(delay);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> Vec<PaymentRequest> {
        self.state().call_log.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state().call_log.len()
    }

    pub fn clear_calls(&self) {
        self.state().call_log.clear();
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the log from the others.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    fn variant(&self) -> ProviderVariant {
        self.variant
    }

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, PaymentError> {
        let delay = {
            let mut state = self.state();
            state.call_log.push(request.clone());
            state.delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state();
        match &state.error {
            Some(error) => Err(error.clone()),
            None => Ok(state.result.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::catalog::subscription_request;
    use crate::ports::PaymentErrorCode;

    #[tokio::test]
    async fn default_result_matches_variant() {
        let mercado = MockPaymentProvider::new(ProviderVariant::MercadoPago);
        let stripe = MockPaymentProvider::new(ProviderVariant::Stripe);
        let request = subscription_request().unwrap();

        assert!(matches!(
            mercado.create_payment(&request).await,
            Ok(PaymentResult::Preference { .. })
        ));
        assert!(matches!(
            stripe.create_payment(&request).await,
            Ok(PaymentResult::ClientSecret { .. })
        ));
    }

    #[tokio::test]
    async fn returning_sets_variant_from_result() {
        let mock = MockPaymentProvider::returning(PaymentResult::client_secret("secret_abc"));
        assert_eq!(mock.variant(), ProviderVariant::Stripe);

        let result = mock
            .create_payment(&subscription_request().unwrap())
            .await
            .unwrap();
        assert_eq!(result, PaymentResult::client_secret("secret_abc"));
    }

    #[tokio::test]
    async fn injected_error_is_returned_until_cleared() {
        let mock = MockPaymentProvider::failing(
            ProviderVariant::MercadoPago,
            PaymentError::network("connection reset"),
        );
        let request = subscription_request().unwrap();

        let err = mock.create_payment(&request).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::NetworkError);

        mock.clear_error();
        assert!(mock.create_payment(&request).await.is_ok());
    }

    #[tokio::test]
    async fn delay_postpones_answer_but_logs_call_first() {
        let mock = MockPaymentProvider::new(ProviderVariant::Stripe);
        mock.set_delay(Duration::from_secs(5));
        let request = subscription_request().unwrap();

        let outcome =
            tokio::time::timeout(Duration::from_millis(20), mock.create_payment(&request)).await;

        assert!(outcome.is_err());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn records_every_call() {
        let mock = MockPaymentProvider::new(ProviderVariant::MercadoPago);
        let request = subscription_request().unwrap().with_external_reference("uid-1");

        mock.create_payment(&request).await.unwrap();
        mock.create_payment(&request).await.unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.calls()[0].external_reference(), Some("uid-1"));

        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
    }
}
