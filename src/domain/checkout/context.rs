//! Invocation context and the authentication gate.

use super::errors::CallableError;
use crate::domain::foundation::AuthenticatedUser;

/// Caller metadata attached by the hosting layer to one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    auth: Option<AuthenticatedUser>,
}

impl InvocationContext {
    /// Context for a caller whose token has been verified.
    pub fn authenticated(user: AuthenticatedUser) -> Self {
        Self { auth: Some(user) }
    }

    /// Context with no verified identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn auth(&self) -> Option<&AuthenticatedUser> {
        self.auth.as_ref()
    }

    /// Passes the verified caller through, or fails with `Unauthenticated`.
    ///
    /// Never retried: a missing identity is not transient from here.
    pub fn require_auth(&self) -> Result<&AuthenticatedUser, CallableError> {
        self.auth.as_ref().ok_or(CallableError::Unauthenticated)
    }
}
