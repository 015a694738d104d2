//! Application state for blinky-server

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::db::{BoxError, Catalog, OrderStore, PgStore};
use crate::orders::OrderService;
use crate::pricing::{PriceEstimator, PricingRates};
use crate::routing::{DistanceResolver, MapboxProvider, OpenRouteProvider, RouteProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<PriceEstimator>,
    pub orders: Arc<OrderService>,
}

impl AppState {
    /// Connect to PostgreSQL, run migrations and wire the pipeline
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let store = Arc::new(PgStore::new(pool));

        let client = reqwest::Client::builder()
            .timeout(config.routing_timeout())
            .build()?;
        let providers: Vec<Arc<dyn RouteProvider>> = vec![
            Arc::new(MapboxProvider::new(
                client.clone(),
                &config.mapbox_base_url,
                &config.mapbox_api_key,
            )),
            Arc::new(OpenRouteProvider::new(
                client,
                &config.openroute_base_url,
                &config.openroute_api_key,
            )),
        ];
        let resolver = DistanceResolver::new(providers, config.retry_policy());

        tracing::info!(
            max_attempts = config.routing_max_attempts,
            retry_delay_ms = config.routing_retry_delay_ms,
            "Routing providers ready"
        );

        Ok(Self::from_parts(
            store.clone(),
            store,
            resolver,
            config.pricing_rates(),
        ))
    }

    pub fn from_parts(
        catalog: Arc<dyn Catalog>,
        store: Arc<dyn OrderStore>,
        resolver: DistanceResolver,
        rates: PricingRates,
    ) -> Self {
        let estimator = Arc::new(PriceEstimator::new(catalog, Arc::new(resolver), rates));
        let orders = Arc::new(OrderService::new(store, estimator.clone()));
        Self { estimator, orders }
    }
}
