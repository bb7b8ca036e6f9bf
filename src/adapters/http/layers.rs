//! Cross-cutting tower-http layers applied around the whole router.
//!
//! Outermost first: request id assignment, request id propagation,
//! request tracing, then CORS. The invocation deadline lives on the
//! callable router so a timeout still answers in the callable error shape.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};

use crate::config::{ServerConfig, ValidationError};

/// Builds the CORS policy from the configured origins.
///
/// An empty list allows no cross-origin callers.
pub fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ValidationError> {
    let origins = config
        .cors_origins_list()
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(&origin)
                .map_err(|_| ValidationError::InvalidCorsOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

/// Wraps `router` with tracing, request ids and CORS.
pub fn with_ambient_layers(
    router: Router,
    config: &ServerConfig,
) -> Result<Router, ValidationError> {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(tracing::Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(tracing::Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        );

    Ok(router
        .layer(cors_layer(config)?)
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}
