//! Checkout module - the request/response shapes of one payment invocation.
//!
//! An invocation is strictly linear: the [`InvocationContext`] gate checks
//! the caller, [`catalog::subscription_request`] builds the fixed
//! [`PaymentRequest`], a provider adapter turns it into a [`PaymentResult`],
//! and any failure is reduced to a [`CallableError`].

pub mod catalog;
mod context;
mod errors;
mod money;
mod request;
mod result;

pub use context::InvocationContext;
pub use errors::{
    CallableError, INTENT_FAILED_MESSAGE, PREFERENCE_FAILED_MESSAGE, UNAUTHENTICATED_MESSAGE,
};
pub use money::{CurrencyCode, Money};
pub use request::{AutoReturn, BackUrls, LineItem, PaymentRequest};
pub use result::{PaymentResult, ProviderVariant};
