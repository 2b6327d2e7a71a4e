//! Crispai server binary.
//!
//! Loads configuration, wires the production adapters into the API router,
//! and serves it with axum.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::ExposeSecret;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crispai::adapters::auth::{Argon2Config, Argon2PasswordHasher, JwtTokenService};
use crispai::adapters::http::{api_router, AppState};
use crispai::adapters::postgres::{PostgresAccountRepository, PostgresOrderRepository};
use crispai::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use crispai::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    config.validate()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let mut stripe_config = StripeConfig::new(
        config.payment.stripe_api_key.expose_secret().as_str(),
        config.payment.stripe_webhook_secret.expose_secret().as_str(),
    );
    if let Some(base_url) = &config.payment.api_base_url {
        stripe_config = stripe_config.with_base_url(base_url.clone());
    }

    let state = AppState {
        account_repository: Arc::new(PostgresAccountRepository::new(pool.clone())),
        order_repository: Arc::new(PostgresOrderRepository::new(pool)),
        payment_provider: Arc::new(StripePaymentAdapter::new(stripe_config)),
        password_hasher: Arc::new(Argon2PasswordHasher::new(Argon2Config::default())),
        token_service: Arc::new(JwtTokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_secs,
        )),
        currency: config.payment.currency.clone(),
    };

    let cors = match config.server.cors_origins_list().as_slice() {
        [] => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
        origins => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, test_mode = config.payment.is_test_mode(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
