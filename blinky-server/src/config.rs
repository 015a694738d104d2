//! Server configuration

use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

use crate::db::BoxError;
use crate::pricing::PricingRates;
use crate::routing::{RetryPolicy, mapbox, openroute};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    pub mapbox_api_key: String,
    pub mapbox_base_url: String,
    pub openroute_api_key: String,
    pub openroute_base_url: String,
    /// Total provider calls per distance lookup
    pub routing_max_attempts: u32,
    /// Linear backoff base between provider calls
    pub routing_retry_delay_ms: u64,
    /// Upper bound on a single provider call
    pub routing_timeout_secs: u64,
    pub base_delivery_fee: Decimal,
    pub per_km_rate: Decimal,
    pub tax_rate: Decimal,
    pub service_fee_rate: Decimal,
    pub currency: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name: &str| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let defaults = PricingRates::default();
        let policy = RetryPolicy::default();

        Ok(Self {
            database_url: var("DATABASE_URL").ok_or("DATABASE_URL must be set")?,
            http_port: parse_or(&var, "HTTP_PORT", 3000)?,
            mapbox_api_key: require_secret(&var, "MAPBOX_API_KEY", &environment)?,
            mapbox_base_url: var("MAPBOX_BASE_URL")
                .unwrap_or_else(|| mapbox::DEFAULT_BASE_URL.into()),
            openroute_api_key: require_secret(&var, "OPENROUTE_API_KEY", &environment)?,
            openroute_base_url: var("OPENROUTE_BASE_URL")
                .unwrap_or_else(|| openroute::DEFAULT_BASE_URL.into()),
            routing_max_attempts: parse_or(&var, "ROUTING_MAX_ATTEMPTS", policy.max_attempts)?,
            routing_retry_delay_ms: parse_or(
                &var,
                "ROUTING_RETRY_DELAY_MS",
                policy.base_delay.as_millis() as u64,
            )?,
            routing_timeout_secs: parse_or(&var, "ROUTING_TIMEOUT_SECS", 10)?,
            base_delivery_fee: parse_or(
                &var,
                "PRICING_BASE_DELIVERY_FEE",
                defaults.base_delivery_fee,
            )?,
            per_km_rate: parse_or(&var, "PRICING_PER_KM_RATE", defaults.per_km_rate)?,
            tax_rate: parse_or(&var, "PRICING_TAX_RATE", defaults.tax_rate)?,
            service_fee_rate: parse_or(&var, "PRICING_SERVICE_FEE_RATE", defaults.service_fee_rate)?,
            currency: var("PRICING_CURRENCY").unwrap_or(defaults.currency),
            environment,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.routing_max_attempts,
            base_delay: Duration::from_millis(self.routing_retry_delay_ms),
        }
    }

    pub fn routing_timeout(&self) -> Duration {
        Duration::from_secs(self.routing_timeout_secs)
    }

    pub fn pricing_rates(&self) -> PricingRates {
        PricingRates {
            base_delivery_fee: self.base_delivery_fee,
            per_km_rate: self.per_km_rate,
            tax_rate: self.tax_rate,
            service_fee_rate: self.service_fee_rate,
            currency: self.currency.clone(),
        }
    }
}

/// Require a secret env var: must be set and non-empty in non-development environments.
fn require_secret(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    environment: &str,
) -> Result<String, BoxError> {
    let val = match var(name) {
        Some(v) => v,
        None => {
            if environment != "development" {
                return Err(format!("{name} must be set in {environment} environment").into());
            }
            format!("dev-{name}-not-for-production")
        }
    };
    if val.is_empty() && environment != "development" {
        return Err(format!("{name} must not be empty in {environment} environment").into());
    }
    Ok(val)
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, BoxError> {
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| -> BoxError { format!("{name} has an invalid value: {raw}").into() }),
        None => Ok(default),
    }
}
