use std::error::Error;
use std::sync::Arc;

use storeconnect_functions::adapters::auth::{FirebaseConfig, FirebaseSessionValidator};
use storeconnect_functions::adapters::http::{
    callable_router, with_ambient_layers, CallableAppState,
};
use storeconnect_functions::adapters::mercadopago::{
    MercadoPagoConfig, MercadoPagoPreferenceAdapter,
};
use storeconnect_functions::adapters::shared_client;
use storeconnect_functions::adapters::stripe::{StripeConfig, StripeIntentAdapter};
use storeconnect_functions::application::CreatePaymentHandler;
use storeconnect_functions::config::{AppConfig, PaymentConfig, ServerConfig, ValidationError};
use storeconnect_functions::domain::checkout::ProviderVariant;
use storeconnect_functions::ports::PaymentProvider;

use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "invalid configuration");
        return Err(e.into());
    }

    let http_client = shared_client(config.payment.provider_timeout())?;

    let validator = FirebaseSessionValidator::new(
        FirebaseConfig::new(config.auth.firebase_project_id.clone())
            .with_cache_duration(config.auth.jwks_cache_ttl()),
        http_client.clone(),
    );
    let provider = build_provider(&config.payment, http_client)?;
    let variant = provider.variant();

    let state = CallableAppState::new(CreatePaymentHandler::new(provider))
        .with_request_timeout(config.server.request_timeout());
    let app = with_ambient_layers(
        callable_router(state, Arc::new(validator)),
        &config.server,
    )?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        provider = %variant,
        function = variant.function_name(),
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        "storeconnect functions listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins
/// over the configured filter.
fn init_tracing(server: &ServerConfig) -> Result<(), Box<dyn Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&server.log_level)?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }
    Ok(())
}

fn build_provider(
    payment: &PaymentConfig,
    http_client: reqwest::Client,
) -> Result<Arc<dyn PaymentProvider>, ValidationError> {
    let credential = payment
        .active_credential()
        .map(|secret| secret.expose_secret().clone());

    let provider: Arc<dyn PaymentProvider> = match payment.provider {
        ProviderVariant::MercadoPago => {
            let token = credential
                .ok_or(ValidationError::MissingRequired("MERCADOPAGO_ACCESS_TOKEN"))?;
            Arc::new(MercadoPagoPreferenceAdapter::new(
                MercadoPagoConfig::new(token),
                http_client,
            ))
        }
        ProviderVariant::Stripe => {
            let key = credential.ok_or(ValidationError::MissingRequired("STRIPE_SECRET_KEY"))?;
            Arc::new(StripeIntentAdapter::new(StripeConfig::new(key), http_client))
        }
    };
    Ok(provider)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT"),
        _ = terminate => tracing::info!("received SIGTERM"),
    }
}
