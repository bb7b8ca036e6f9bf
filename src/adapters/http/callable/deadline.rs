//! Per-invocation deadline for the callable functions.
//!
//! Wraps token validation and the provider call. An invocation that runs
//! past the deadline answers with the variant's `INTERNAL` error instead of
//! a transport-level timeout, and the abandonment is logged.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::checkout::{CallableError, ProviderVariant};

use super::handlers::CallableApiError;

/// Deadline settings for the mounted function.
#[derive(Debug, Clone, Copy)]
pub struct CallableDeadline {
    pub variant: ProviderVariant,
    pub timeout: Duration,
}

pub async fn callable_deadline(
    State(deadline): State<CallableDeadline>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(deadline.timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::error!(
                provider = %deadline.variant,
                path = %path,
                timeout_ms = deadline.timeout.as_millis() as u64,
                "callable invocation timed out"
            );
            CallableApiError(CallableError::internal(deadline.variant)).into_response()
        }
    }
}
