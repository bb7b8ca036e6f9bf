//! Caller-visible error taxonomy.
//!
//! Only two categories ever reach the mobile client. Both carry a fixed,
//! non-technical message; provider detail stays in the server logs.

use std::fmt;

use super::result::ProviderVariant;

/// Message shown when the caller is not signed in.
pub const UNAUTHENTICATED_MESSAGE: &str = "Você precisa estar logado para fazer isso.";

/// Message shown when the preference could not be created.
pub const PREFERENCE_FAILED_MESSAGE: &str = "Não foi possível criar a preferência de pagamento.";

/// Message shown when the payment intent could not be created.
pub const INTENT_FAILED_MESSAGE: &str = "Não foi possível criar a intenção de pagamento.";

/// Errors surfaced through the callable protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableError {
    /// No verified caller identity was attached to the invocation.
    Unauthenticated,

    /// The provider call failed; the detail has already been logged.
    Internal(ProviderVariant),
}

impl CallableError {
    pub fn internal(variant: ProviderVariant) -> Self {
        CallableError::Internal(variant)
    }

    /// Canonical status name in the callable protocol.
    pub fn status(&self) -> &'static str {
        match self {
            CallableError::Unauthenticated => "UNAUTHENTICATED",
            CallableError::Internal(_) => "INTERNAL",
        }
    }

    /// Fixed user-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            CallableError::Unauthenticated => UNAUTHENTICATED_MESSAGE,
            CallableError::Internal(variant) => internal_message(*variant),
        }
    }
}

impl fmt::Display for CallableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CallableError {}

fn internal_message(variant: ProviderVariant) -> &'static str {
    match variant {
        ProviderVariant::MercadoPago => PREFERENCE_FAILED_MESSAGE,
        ProviderVariant::Stripe => INTENT_FAILED_MESSAGE,
    }
}
