//! Authentication middleware and extractor for axum.
//!
//! This module provides:
//! - `auth_middleware` - validates the Bearer ID token and attaches an
//!   `InvocationContext` to every request
//! - `Invocation` - extractor that hands the context to handlers
//!
//! # Architecture
//!
//! The middleware never rejects a request. Callable functions report a
//! missing or bad credential as an `unauthenticated` error from the
//! function itself, so the decision belongs to the invocation gate:
//!
//! ```text
//! Request → auth_middleware → InvocationContext (authenticated | anonymous)
//!                                      ↓
//!           Handler → Invocation extractor → context.require_auth()
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::domain::checkout::InvocationContext;
use crate::domain::foundation::AuthError;
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Validates the caller's ID token and attaches the resulting
/// `InvocationContext` to the request extensions.
///
/// A missing header leaves the context anonymous without calling the
/// validator. Rejected tokens and validator outages also leave it
/// anonymous; outages are logged at `error`.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = match bearer_token(request.headers()) {
        Some(token) => match validator.validate(token).await {
            Ok(user) => {
                tracing::debug!(
                    uid = %user.id,
                    verified_email = user.has_verified_email(),
                    "caller authenticated"
                );
                InvocationContext::authenticated(user)
            }
            Err(AuthError::ServiceUnavailable(reason)) => {
                tracing::error!(reason = %reason, "auth service unavailable");
                InvocationContext::anonymous()
            }
            Err(e) => {
                tracing::debug!(error = %e, "caller token rejected");
                InvocationContext::anonymous()
            }
        },
        None => InvocationContext::anonymous(),
    };

    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Extractor for the invocation context attached by `auth_middleware`.
///
/// Routes mounted without the middleware see an anonymous context.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(Invocation(context): Invocation) -> impl IntoResponse {
///     match context.require_auth() {
///         Ok(user) => format!("uid {}", user.id),
///         Err(e) => e.to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Invocation(pub InvocationContext);

impl<S> axum::extract::FromRequestParts<S> for Invocation
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let context = parts
                .extensions
                .get::<InvocationContext>()
                .cloned()
                .unwrap_or_default();
            Ok(Invocation(context))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use crate::adapters::auth::MockSessionValidator;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    async fn whoami(Invocation(context): Invocation) -> String {
        context
            .auth()
            .map(|user| user.id.to_string())
            .unwrap_or_else(|| "anonymous".to_string())
    }

    fn app(validator: Arc<MockSessionValidator>) -> Router {
        let state: AuthState = validator;
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn call(app: Router, authorization: Option<&str>) -> String {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Token Extraction
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("Bearer   abc ")), Some("abc"));
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with("abc")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_authenticates_context() {
        let validator = Arc::new(MockSessionValidator::new().with_test_user("good", "uid-1"));

        assert_eq!(call(app(validator), Some("Bearer good")).await, "uid-1");
    }

    #[tokio::test]
    async fn missing_header_skips_validation() {
        let validator = Arc::new(MockSessionValidator::new());

        assert_eq!(call(app(validator.clone()), None).await, "anonymous");
        assert_eq!(validator.validation_count(), 0);
    }

    #[tokio::test]
    async fn rejected_token_leaves_context_anonymous() {
        let validator = Arc::new(MockSessionValidator::new().with_test_user("good", "uid-1"));

        assert_eq!(call(app(validator), Some("Bearer forged")).await, "anonymous");
    }

    #[tokio::test]
    async fn expired_token_leaves_context_anonymous() {
        let validator = Arc::new(
            MockSessionValidator::new()
                .with_test_user("good", "uid-1")
                .with_error(AuthError::TokenExpired),
        );

        assert_eq!(call(app(validator), Some("Bearer good")).await, "anonymous");
    }

    #[tokio::test]
    async fn validator_outage_leaves_context_anonymous() {
        let validator = Arc::new(
            MockSessionValidator::new()
                .with_test_user("good", "uid-1")
                .with_error(AuthError::service_unavailable("keys down")),
        );

        assert_eq!(call(app(validator), Some("Bearer good")).await, "anonymous");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractor
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn extractor_defaults_to_anonymous_without_middleware() {
        use axum::extract::FromRequestParts;

        let request = axum::http::Request::builder().uri("/x").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let Invocation(context) = Invocation::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert!(context.auth().is_none());
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
    }
}
