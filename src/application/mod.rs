//! Application layer - orchestrates domain operations across ports.

pub mod handlers;

pub use handlers::CreatePaymentHandler;
