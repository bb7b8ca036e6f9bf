//! Axum router configuration for the callable functions.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::{auth_middleware, AuthState};

use super::deadline::{callable_deadline, CallableDeadline};
use super::handlers::{create_payment, health, CallableAppState};

/// Create the callable router.
///
/// # Routes
///
/// - `POST /createPaymentPreference` or `POST /createPaymentIntent` -
///   whichever matches the configured provider; behind `auth_middleware`
///   and bounded by `state.request_timeout`
/// - `GET /health` - liveness and active provider
pub fn callable_router(state: CallableAppState, auth: AuthState) -> Router {
    let variant = state.create_payment.variant();
    let function_path = format!("/{}", variant.function_name());
    let deadline = CallableDeadline {
        variant,
        timeout: state.request_timeout,
    };

    let functions = Router::new()
        .route(&function_path, post(create_payment))
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .layer(middleware::from_fn_with_state(deadline, callable_deadline));

    Router::new()
        .merge(functions)
        .route("/health", get(health))
        .with_state(state)
}
