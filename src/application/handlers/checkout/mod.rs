//! Checkout handlers.

mod create_payment;

pub use create_payment::CreatePaymentHandler;
