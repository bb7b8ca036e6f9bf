//! HTTP handlers for the callable payment functions.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::middleware::Invocation;
use crate::application::handlers::CreatePaymentHandler;
use crate::domain::checkout::{CallableError, PaymentResult};

use super::dto::{CallableErrorResponse, CallableRequest, CallableResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Default upper bound on one invocation, auth included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared state for the callable routes.
#[derive(Clone)]
pub struct CallableAppState {
    pub create_payment: Arc<CreatePaymentHandler>,

    /// Past this the caller gets the variant's `INTERNAL` error.
    pub request_timeout: Duration,
}

impl CallableAppState {
    pub fn new(create_payment: CreatePaymentHandler) -> Self {
        Self {
            create_payment: Arc::new(create_payment),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /createPaymentPreference or /createPaymentIntent
///
/// The request payload is ignored; a malformed one is logged and skipped.
pub async fn create_payment(
    State(state): State<CallableAppState>,
    Invocation(context): Invocation,
    body: Bytes,
) -> Result<Json<CallableResponse<PaymentResult>>, CallableApiError> {
    match CallableRequest::parse(&body) {
        Ok(request) if request.has_data() => {
            tracing::debug!("ignoring callable payload");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::debug!(error = %e, "ignoring malformed callable payload");
        }
    }

    let result = state.create_payment.handle(&context).await?;

    Ok(Json(CallableResponse { result }))
}

/// GET /health
pub async fn health(State(state): State<CallableAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.create_payment.variant(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Maps `CallableError` onto the callable protocol's HTTP shape.
#[derive(Debug)]
pub struct CallableApiError(pub CallableError);

impl From<CallableError> for CallableApiError {
    fn from(err: CallableError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CallableApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            CallableError::Unauthenticated => StatusCode::UNAUTHORIZED,
            CallableError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(CallableErrorResponse::from(self.0))).into_response()
    }
}
