//! HTTP middleware for axum.
//!
//! - `auth` - ID-token validation and the invocation context extractor

pub mod auth;

pub use auth::{auth_middleware, bearer_token, AuthState, Invocation};
