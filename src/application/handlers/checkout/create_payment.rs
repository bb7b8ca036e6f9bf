//! CreatePaymentHandler - the callable function body.
//!
//! check identity → build request → call provider → map result or error.

use std::sync::Arc;

use crate::domain::checkout::{
    catalog, CallableError, InvocationContext, PaymentResult, ProviderVariant,
};
use crate::ports::PaymentProvider;

/// Handler for one payment-creation invocation.
///
/// Stateless; one instance is shared by all requests.
pub struct CreatePaymentHandler {
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreatePaymentHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self { payment_provider }
    }

    pub fn variant(&self) -> ProviderVariant {
        self.payment_provider.variant()
    }

    pub async fn handle(
        &self,
        context: &InvocationContext,
    ) -> Result<PaymentResult, CallableError> {
        let variant = self.variant();

        // 1. Gate: nothing below runs for anonymous callers
        let user = context.require_auth()?;

        // 2. Fixed-shape request tagged with the caller's uid
        let request = catalog::subscription_request()
            .map_err(|e| {
                tracing::error!(provider = %variant, error = %e, "payment request rejected");
                CallableError::internal(variant)
            })?
            .with_external_reference(user.id.as_str());

        // 3. Single provider call, no retry
        match self.payment_provider.create_payment(&request).await {
            Ok(result) => {
                tracing::info!(
                    provider = %variant,
                    uid = %user.id,
                    result = %result,
                    "payment created"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!(
                    provider = %variant,
                    uid = %user.id,
                    code = %e.code,
                    provider_code = e.provider_code.as_deref().unwrap_or("-"),
                    http_status = e.http_status,
                    detail = %e.message,
                    "payment provider call failed"
                );
                Err(CallableError::internal(variant))
            }
        }
    }
}
