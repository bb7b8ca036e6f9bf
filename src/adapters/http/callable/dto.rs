//! HTTP DTOs for the callable protocol.
//!
//! Requests arrive as `{"data": ...}`; successes are wrapped as
//! `{"result": ...}` and failures as `{"error": {"status", "message"}}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::checkout::{CallableError, ProviderVariant};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Callable request envelope. Payment functions take no arguments, so
/// `data` is read only for logging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallableRequest {
    #[serde(default)]
    pub data: Option<Value>,
}

impl CallableRequest {
    /// Parses a request body; an empty body is an empty request.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    pub fn has_data(&self) -> bool {
        !matches!(self.data, None | Some(Value::Null))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Successful callable response.
#[derive(Debug, Clone, Serialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

/// Failed callable response.
#[derive(Debug, Clone, Serialize)]
pub struct CallableErrorResponse {
    pub error: CallableErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallableErrorBody {
    /// Canonical status name, e.g. `UNAUTHENTICATED`.
    pub status: &'static str,
    pub message: &'static str,
}

impl From<CallableError> for CallableErrorResponse {
    fn from(err: CallableError) -> Self {
        Self {
            error: CallableErrorBody {
                status: err.status(),
                message: err.message(),
            },
        }
    }
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: ProviderVariant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::{PaymentResult, UNAUTHENTICATED_MESSAGE};
    use serde_json::json;

    #[test]
    fn empty_body_is_empty_request() {
        let request = CallableRequest::parse(b"").unwrap();
        assert!(!request.has_data());

        let request = CallableRequest::parse(b"  \n").unwrap();
        assert!(!request.has_data());
    }

    #[test]
    fn null_data_counts_as_no_data() {
        let request = CallableRequest::parse(br#"{"data": null}"#).unwrap();
        assert!(!request.has_data());
    }

    #[test]
    fn arbitrary_data_is_accepted() {
        let request = CallableRequest::parse(br#"{"data": {"plan": "monthly"}}"#).unwrap();
        assert!(request.has_data());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(CallableRequest::parse(b"{not json").is_err());
    }

    #[test]
    fn success_wraps_result() {
        let body = CallableResponse {
            result: PaymentResult::preference("PREF-123"),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"result": {"preferenceId": "PREF-123"}})
        );
    }

    #[test]
    fn error_body_uses_status_and_message() {
        let body = CallableErrorResponse::from(CallableError::Unauthenticated);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"error": {"status": "UNAUTHENTICATED", "message": UNAUTHENTICATED_MESSAGE}})
        );
    }

    #[test]
    fn health_names_provider() {
        let body = HealthResponse {
            status: "ok",
            provider: ProviderVariant::Stripe,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"status": "ok", "provider": "stripe"})
        );
    }
}
