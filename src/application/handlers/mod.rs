//! Command handlers for the callable functions.

pub mod checkout;

pub use checkout::CreatePaymentHandler;
