//! Authentication types for the domain layer.
//!
//! These types describe the caller identity attached to an invocation after
//! its Firebase ID token has been verified. They carry no provider
//! dependencies; the `SessionValidator` port is what populates them.

use super::UserId;
use thiserror::Error;

/// Caller identity extracted from a verified ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Firebase UID (`sub` claim).
    pub id: UserId,

    /// Email address, absent for phone and anonymous sign-ins.
    pub email: Option<String>,

    /// Display name if the token carries one.
    pub display_name: Option<String>,

    /// Whether the email has been verified by the identity provider.
    pub email_verified: bool,
}

impl AuthenticatedUser {
    pub fn new(
        id: UserId,
        email: Option<String>,
        display_name: Option<String>,
        email_verified: bool,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            email_verified,
        }
    }

    /// True when the token carries an email the provider has confirmed.
    pub fn has_verified_email(&self) -> bool {
        self.email_verified && self.email.is_some()
    }
}

/// Why an ID token did not yield a caller identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Malformed token, bad signature, or wrong issuer/audience/subject.
    #[error("ID token rejected")]
    InvalidToken,

    /// Signature checks out but `exp` has passed.
    #[error("ID token expired")]
    TokenExpired,

    /// Signing keys could not be fetched.
    #[error("signing keys unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }
}
