//! Firebase Authentication adapter for ID-token validation.
//!
//! Implements the `SessionValidator` port by verifying Firebase ID tokens
//! the way the Admin SDKs do:
//!
//! 1. Fetch Google's public keys for `securetoken@system.gserviceaccount.com`
//! 2. Verify the RS256 signature against the key named by `kid`,
//!    refetching once when Google has rotated to a key we have not seen
//! 3. Check issuer, audience, expiry and subject
//! 4. Map claims to the domain `AuthenticatedUser`
//!
//! # Example
//!
//! ```ignore
//! let config = FirebaseConfig::new("storeconnect-app");
//! let validator = FirebaseSessionValidator::new(config, reqwest::Client::new());
//! let user = validator.validate("eyJ...").await?;
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header,
    jwk::{Jwk, JwkSet},
    Algorithm, DecodingKey, Header, Validation,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Google's JWKS endpoint for Firebase ID-token signing keys.
pub const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(3600);
const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for the Firebase ID-token validator.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Firebase project ID; the expected `aud` and the issuer suffix.
    pub project_id: String,

    /// Where signing keys are fetched from.
    pub jwks_url: String,

    /// How long fetched keys are reused.
    pub jwks_cache_duration: Duration,

    /// Minimum age of the cached keys before an unknown `kid` may trigger
    /// an early refetch.
    pub jwks_min_refresh_interval: Duration,
}

impl FirebaseConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            jwks_url: FIREBASE_JWKS_URL.to_string(),
            jwks_cache_duration: DEFAULT_CACHE_DURATION,
            jwks_min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
        }
    }

    /// Point key discovery at another endpoint (used by tests).
    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = duration;
        self
    }

    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.jwks_min_refresh_interval = interval;
        self
    }

    /// Expected `iss` claim for this project.
    pub fn issuer(&self) -> String {
        format!("{}{}", ISSUER_PREFIX, self.project_id)
    }
}

/// Claims carried by a Firebase ID token.
#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,

    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    email_verified: Option<bool>,

    #[serde(default)]
    name: Option<String>,
}

struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }

    fn snapshot(&self) -> (JwkSet, Instant) {
        (self.jwks.clone(), self.fetched_at)
    }
}

/// Production `SessionValidator` backed by Firebase Authentication.
///
/// Keys are fetched lazily on the first validation, not at construction.
pub struct FirebaseSessionValidator {
    config: FirebaseConfig,
    issuer: String,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl FirebaseSessionValidator {
    pub fn new(config: FirebaseConfig, http_client: reqwest::Client) -> Self {
        let issuer = config.issuer();
        Self {
            config,
            issuer,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = &self.config.jwks_url;
        tracing::debug!(url = %url, "fetching firebase signing keys");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            AuthError::service_unavailable(format!("failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AuthError::service_unavailable(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            AuthError::service_unavailable(format!("failed to parse JWKS: {}", e))
        })?;

        tracing::debug!(keys = jwks.keys.len(), "fetched firebase signing keys");
        Ok(jwks)
    }

    /// Cached keys and when they were fetched, fetching if absent or
    /// expired. Concurrent misses share one fetch.
    async fn cached_jwks(&self) -> Result<(JwkSet, Instant), AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(cached) = cache.as_ref().filter(|c| !c.is_expired()) {
                return Ok(cached.snapshot());
            }
        }

        let mut cache = self.jwks_cache.write().await;
        // Another task may have refilled the cache while this one waited.
        if let Some(cached) = cache.as_ref().filter(|c| !c.is_expired()) {
            return Ok(cached.snapshot());
        }

        let fresh = JwksCache::new(self.fetch_jwks().await?, self.config.jwks_cache_duration);
        let snapshot = fresh.snapshot();
        *cache = Some(fresh);
        Ok(snapshot)
    }

    /// Refetches after a `kid` miss against keys fetched at `seen_at`.
    ///
    /// Returns `None` while the cached keys are younger than the minimum
    /// refresh interval.
    async fn refresh_after_miss(&self, seen_at: Instant) -> Result<Option<JwkSet>, AuthError> {
        let mut cache = self.jwks_cache.write().await;
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at > seen_at {
                return Ok(Some(cached.jwks.clone()));
            }
            if cached.fetched_at.elapsed() < self.config.jwks_min_refresh_interval {
                return Ok(None);
            }
        }

        tracing::debug!("unknown kid, refreshing firebase signing keys");
        let fresh = JwksCache::new(self.fetch_jwks().await?, self.config.jwks_cache_duration);
        let jwks = fresh.jwks.clone();
        *cache = Some(fresh);
        Ok(Some(jwks))
    }

    async fn decoding_key_for(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let (jwks, fetched_at) = self.cached_jwks().await?;
        if let Some(jwk) = jwks.find(kid) {
            return decoding_key(jwk);
        }

        let refreshed = self.refresh_after_miss(fetched_at).await?;
        match refreshed.as_ref().and_then(|jwks| jwks.find(kid)) {
            Some(jwk) => decoding_key(jwk),
            None => {
                tracing::warn!(kid = %kid, "no signing key matches kid");
                Err(AuthError::InvalidToken)
            }
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.config.project_id]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }
}

#[async_trait]
impl SessionValidator for FirebaseSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "failed to decode token header");
            AuthError::InvalidToken
        })?;

        let kid = signing_kid(&header)?;
        let decoding_key = self.decoding_key_for(kid).await?;

        let claims = decode::<FirebaseClaims>(token, &decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => {
                        tracing::warn!(error = %e, "token validation failed");
                        AuthError::InvalidToken
                    }
                }
            })?
            .claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("token subject is not a usable uid");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(
            user_id,
            claims.email,
            claims.name,
            claims.email_verified.unwrap_or(false),
        ))
    }
}

/// The `kid` of an RS256 header; Firebase never signs with anything else.
fn signing_kid(header: &Header) -> Result<&str, AuthError> {
    if header.alg != Algorithm::RS256 {
        tracing::warn!(alg = ?header.alg, "rejected token with unexpected algorithm");
        return Err(AuthError::InvalidToken);
    }

    header.kid.as_deref().ok_or_else(|| {
        tracing::warn!("token missing 'kid' header");
        AuthError::InvalidToken
    })
}

fn decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    DecodingKey::from_jwk(jwk).map_err(|e| {
        tracing::warn!(error = %e, "unusable signing key");
        AuthError::InvalidToken
    })
}

impl std::fmt::Debug for FirebaseSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseSessionValidator")
            .field("project_id", &self.config.project_id)
            .field("jwks_url", &self.config.jwks_url)
            .finish_non_exhaustive()
    }
}
