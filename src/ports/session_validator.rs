//! Session validation port for caller ID tokens.
//!
//! The HTTP auth middleware hands every `Authorization: Bearer` token to this
//! port. It is provider-agnostic: production uses Firebase Authentication,
//! tests use an in-memory map.
//!
//! # Contract
//!
//! Implementations must verify the token signature and its issuer, audience
//! and expiry claims before returning a user.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates ID tokens and extracts the caller identity.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    ///
    /// * `Err(AuthError::InvalidToken)` - malformed, bad signature or claims
    /// * `Err(AuthError::TokenExpired)` - signature valid but expired
    /// * `Err(AuthError::ServiceUnavailable)` - key material unreachable
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    struct FixedTokenValidator;

    #[async_trait]
    impl SessionValidator for FixedTokenValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            if token == "good" {
                Ok(AuthenticatedUser::new(
                    UserId::new("user-123").unwrap(),
                    None,
                    None,
                    false,
                ))
            } else {
                Err(AuthError::InvalidToken)
            }
        }
    }

    #[tokio::test]
    async fn validator_is_usable_as_trait_object() {
        let validator: std::sync::Arc<dyn SessionValidator> =
            std::sync::Arc::new(FixedTokenValidator);

        assert_eq!(validator.validate("good").await.unwrap().id.as_str(), "user-123");
        assert!(matches!(
            validator.validate("bad").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
