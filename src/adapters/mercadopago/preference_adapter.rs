//! Mercado Pago preference adapter.
//!
//! Implements `PaymentProvider` by creating a Checkout Pro preference and
//! returning its ID; the mobile client opens checkout with it.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::checkout::{PaymentRequest, PaymentResult, ProviderVariant};
use crate::ports::{PaymentError, PaymentProvider};

use super::api_types::{MercadoPagoErrorBody, PreferenceBody, PreferenceResponse};

pub const MERCADOPAGO_API_BASE_URL: &str = "https://api.mercadopago.com";

/// Mercado Pago API configuration.
#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    /// Access token (APP_USR-... in production, TEST-... in sandbox).
    access_token: SecretString,

    api_base_url: String,
}

impl MercadoPagoConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            api_base_url: MERCADOPAGO_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn is_test_mode(&self) -> bool {
        self.access_token.expose_secret().starts_with("TEST-")
    }
}

/// Preference-based payment provider over the Mercado Pago REST API.
pub struct MercadoPagoPreferenceAdapter {
    config: MercadoPagoConfig,
    http_client: reqwest::Client,
}

impl MercadoPagoPreferenceAdapter {
    pub fn new(config: MercadoPagoConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    async fn error_from_response(response: reqwest::Response) -> PaymentError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<MercadoPagoErrorBody>(&body) {
            Ok(parsed) => {
                let err = PaymentError::from_status(
                    status,
                    format!("Mercado Pago API error: {}", parsed.describe()),
                );
                match parsed.provider_code() {
                    Some(code) => err.with_provider_code(code),
                    None => err,
                }
            }
            Err(_) => {
                PaymentError::from_status(status, format!("Mercado Pago API error: {}", body))
            }
        }
    }
}

#[async_trait]
impl PaymentProvider for MercadoPagoPreferenceAdapter {
    fn variant(&self) -> ProviderVariant {
        ProviderVariant::MercadoPago
    }

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, PaymentError> {
        let url = format!("{}/checkout/preferences", self.config.api_base_url);
        let idempotency_key = uuid::Uuid::new_v4().to_string();

        tracing::debug!(
            total = %request.total(),
            idempotency_key = %idempotency_key,
            "creating Mercado Pago preference"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.access_token.expose_secret())
            .header("X-Idempotency-Key", &idempotency_key)
            .json(&PreferenceBody::from(request))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let preference: PreferenceResponse = response.json().await.map_err(|e| {
            PaymentError::invalid_response(format!("Failed to parse Mercado Pago response: {}", e))
        })?;

        let id = preference
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PaymentError::invalid_response("Mercado Pago preference has no id"))?;

        tracing::debug!(
            preference_id = %id,
            sandbox = preference.init_point.is_none() && preference.sandbox_init_point.is_some(),
            "Mercado Pago preference created"
        );

        Ok(PaymentResult::preference(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{header, HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    use crate::domain::checkout::catalog::subscription_request;
    use crate::ports::PaymentErrorCode;

    #[derive(Clone, Default)]
    struct Captured {
        requests: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    }

    /// Fake Mercado Pago that records each request and answers with
    /// `status`/`body`.
    async fn spawn_mercadopago(status: StatusCode, body: &'static str) -> (String, Captured) {
        let captured = Captured::default();
        let app = Router::new()
            .route(
                "/checkout/preferences",
                post(
                    move |State(captured): State<Captured>,
                          headers: HeaderMap,
                          Json(payload): Json<Value>| async move {
                        captured.requests.lock().unwrap().push((headers, payload));
                        (status, [(header::CONTENT_TYPE, "application/json")], body)
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    fn adapter_for(base_url: &str) -> MercadoPagoPreferenceAdapter {
        MercadoPagoPreferenceAdapter::new(
            MercadoPagoConfig::new("TEST-123-abc").with_base_url(base_url),
            reqwest::Client::new(),
        )
    }

    fn request() -> PaymentRequest {
        subscription_request().unwrap().with_external_reference("uid-42")
    }

    const PREFERENCE_OK: &str = r#"{
        "id": "PREF-123",
        "init_point": "https://www.mercadopago.com.br/checkout/v1/redirect?pref_id=PREF-123",
        "sandbox_init_point": "https://sandbox.mercadopago.com.br/checkout/v1/redirect?pref_id=PREF-123"
    }"#;

    #[test]
    fn config_detects_test_mode() {
        assert!(MercadoPagoConfig::new("TEST-123").is_test_mode());
        assert!(!MercadoPagoConfig::new("APP_USR-123").is_test_mode());
    }

    #[test]
    fn config_debug_redacts_token() {
        let shown = format!("{:?}", MercadoPagoConfig::new("APP_USR-very-secret"));
        assert!(!shown.contains("very-secret"));
    }

    #[tokio::test]
    async fn returns_preference_id_on_success() {
        let (base_url, _) = spawn_mercadopago(StatusCode::CREATED, PREFERENCE_OK).await;

        let result = adapter_for(&base_url).create_payment(&request()).await;

        assert_eq!(result, Ok(PaymentResult::preference("PREF-123")));
    }

    #[tokio::test]
    async fn sends_bearer_token_idempotency_key_and_body() {
        let (base_url, captured) = spawn_mercadopago(StatusCode::CREATED, PREFERENCE_OK).await;

        adapter_for(&base_url)
            .create_payment(&request())
            .await
            .unwrap();

        let requests = captured.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (headers, body) = &requests[0];

        assert_eq!(headers[header::AUTHORIZATION], "Bearer TEST-123-abc");
        let key = headers["x-idempotency-key"].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(key).is_ok());

        assert_eq!(body["items"][0]["title"], "Assinatura Mensal StoreConnect");
        assert_eq!(body["items"][0]["unit_price"], json!(50.0));
        assert_eq!(body["items"][0]["currency_id"], "BRL");
        assert_eq!(body["auto_return"], "approved");
        assert_eq!(body["back_urls"]["pending"], "https://seusite.com/pending");
        assert_eq!(body["external_reference"], "uid-42");
    }

    #[tokio::test]
    async fn rejected_request_keeps_cause_detail() {
        let body = r#"{
            "message": "invalid items",
            "error": "bad_request",
            "status": 400,
            "cause": [{"code": "invalid_unit_price", "description": "unit_price must be positive"}]
        }"#;
        let (base_url, _) = spawn_mercadopago(StatusCode::BAD_REQUEST, body).await;

        let err = adapter_for(&base_url)
            .create_payment(&request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::InvalidRequest);
        assert_eq!(err.provider_code.as_deref(), Some("invalid_unit_price"));
        assert_eq!(err.http_status, Some(400));
        assert!(err.message.contains("unit_price must be positive"));
    }

    #[tokio::test]
    async fn bad_token_is_authentication_error() {
        let body = r#"{"message": "invalid access token", "error": "unauthorized", "status": 401}"#;
        let (base_url, _) = spawn_mercadopago(StatusCode::UNAUTHORIZED, body).await;

        let err = adapter_for(&base_url)
            .create_payment(&request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::AuthenticationError);
    }

    #[tokio::test]
    async fn rate_limit_is_classified() {
        let (base_url, _) = spawn_mercadopago(StatusCode::TOO_MANY_REQUESTS, "{}").await;

        let err = adapter_for(&base_url)
            .create_payment(&request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::RateLimitExceeded);
    }

    #[tokio::test]
    async fn server_error_with_html_body_is_provider_error() {
        let (base_url, _) =
            spawn_mercadopago(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").await;

        let err = adapter_for(&base_url)
            .create_payment(&request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::ProviderError);
        assert!(err.message.contains("<html>oops</html>"));
    }

    #[tokio::test]
    async fn empty_id_is_invalid_response() {
        let (base_url, _) = spawn_mercadopago(StatusCode::CREATED, r#"{"id": ""}"#).await;

        let err = adapter_for(&base_url)
            .create_payment(&request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::InvalidResponse);
    }

    #[tokio::test]
    async fn unparsable_success_body_is_invalid_response() {
        let (base_url, _) = spawn_mercadopago(StatusCode::OK, "not json").await;

        let err = adapter_for(&base_url)
            .create_payment(&request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::InvalidResponse);
    }

    #[tokio::test]
    async fn unreachable_api_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = adapter_for(&format!("http://{}", addr))
            .create_payment(&request())
            .await
            .unwrap_err();

        assert_eq!(err.code, PaymentErrorCode::NetworkError);
    }
}
