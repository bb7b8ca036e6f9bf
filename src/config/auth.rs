//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Authentication configuration (Firebase Authentication)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Firebase project whose ID tokens are accepted
    #[serde(default)]
    pub firebase_project_id: String,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.firebase_project_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("FIREBASE_PROJECT_ID"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            firebase_project_id: String::new(),
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
        }
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.jwks_cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_validation_requires_project_id() {
        let config = AuthConfig {
            firebase_project_id: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("FIREBASE_PROJECT_ID"))
        );
    }

    #[test]
    fn test_validation_accepts_project_id() {
        let config = AuthConfig {
            firebase_project_id: "storeconnect-app".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
