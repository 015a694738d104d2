//! blinky-server: marketplace order pipeline
//!
//! Long-running service that:
//! - Resolves delivery distances through Mapbox / OpenRouteService with failover
//! - Prices carts (items, tax, delivery, service fee)
//! - Creates orders atomically with a per-site daily order code

mod api;
mod config;
mod db;
mod error;
mod orders;
mod pricing;
mod routing;
mod state;

use config::Config;
use db::BoxError;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blinky_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting blinky-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("blinky-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
