//! Foundation module - Shared domain primitives.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::ValidationError;
pub use ids::UserId;
