//! Perfume Backoffice - Backend Server

use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use perfumeria_backend::{
    create_app,
    external::{DolarApiClient, ExchangeRateApiClient},
    services::RateCache,
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "perfumeria_server=debug,perfumeria_backend=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Perfumeria Backoffice Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    if config.rates.exchange_api_key.is_empty() {
        tracing::warn!("PFM_RATES__EXCHANGE_API_KEY not set, /api/v1/rates will fail");
    }

    let ttl = config.rates.ttl();
    let exchange_client = ExchangeRateApiClient::with_base_url(
        config.rates.exchange_api_key.clone(),
        config.rates.exchange_api_base_url.clone(),
    );
    let dolar_client = DolarApiClient::with_base_url(config.rates.dolar_api_base_url.clone());

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
        exchange_rates: Arc::new(RateCache::new(Arc::new(exchange_client), ttl)),
        dolar_rates: Arc::new(RateCache::new(Arc::new(dolar_client), ttl)),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = config.server.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
