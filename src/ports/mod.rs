//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionValidator` - verifies caller ID tokens
//! - `PaymentProvider` - creates the provider-side payment object

mod payment_provider;
mod session_validator;

pub use payment_provider::{PaymentError, PaymentErrorCode, PaymentProvider};
pub use session_validator::SessionValidator;
