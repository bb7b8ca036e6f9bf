//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `firebase` - Firebase ID-token validation against Google's keys
//! - `mock` - fixed token table for tests and local runs

mod firebase;
mod mock;

pub use firebase::{FirebaseConfig, FirebaseSessionValidator, FIREBASE_JWKS_URL};
pub use mock::MockSessionValidator;
