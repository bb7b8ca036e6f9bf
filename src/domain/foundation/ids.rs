//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Firebase Authentication UID of the caller.
///
/// Firebase UIDs are opaque strings of at most 128 characters; we only
/// reject values that could never have been issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Longest UID Firebase Authentication will issue.
const MAX_USER_ID_LEN: usize = 128;

impl UserId {
    /// Creates a new UserId, returning error if empty or malformed.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        if id.len() > MAX_USER_ID_LEN {
            return Err(ValidationError::invalid_format(
                "user_id",
                format!("longer than {} bytes", MAX_USER_ID_LEN),
            ));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "user_id",
                "contains whitespace",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
