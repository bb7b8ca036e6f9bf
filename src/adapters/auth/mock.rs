//! Mock session validator for tests and local runs.
//!
//! Accepts a fixed set of bearer tokens so the callable endpoints can be
//! exercised without signing real Firebase ID tokens.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new().with_test_user("valid-token", "uid-123");
//! let user = validator.validate("valid-token").await?;
//! assert_eq!(user.id.as_str(), "uid-123");
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Mock session validator.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation while set.
    force_error: RwLock<Option<AuthError>>,
    validations: AtomicUsize,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a valid token for a user with the given uid and a test email.
    ///
    /// # Panics
    ///
    /// Panics if `user_id` is not a valid `UserId`.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).expect("mock user id must be valid"),
            Some(format!("{}@test.example.com", user_id)),
            None,
            true,
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().expect("lock poisoned") = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().expect("lock poisoned") = None;
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .expect("lock poisoned")
            .insert(token.into(), user);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens.write().expect("lock poisoned").remove(token);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().expect("lock poisoned").len()
    }

    /// How many times `validate` has been called.
    pub fn validation_count(&self) -> usize {
        self.validations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.validations.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.force_error.read().expect("lock poisoned").clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .expect("lock poisoned")
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
