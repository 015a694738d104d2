//! Distance resolution with provider failover

use chrono::{DateTime, Utc};
use shared::error::{AppError, ErrorCode};
use shared::models::{Coordinate, TransportProfile};
use std::sync::Arc;
use thiserror::Error;

use super::policy::{ProviderSelector, RandomSelector, RetryPolicy};
use super::provider::{ProviderKind, RouteProvider};

/// Travel distance between two points, fresh per request
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceResult {
    pub distance_meters: f64,
    pub duration_seconds: Option<f64>,
    pub provider_used: ProviderKind,
    pub resolved_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("All services failed after {attempts} attempts. Last error: {last_error}")]
    AllProvidersExhausted {
        attempts: u32,
        failed: Vec<ProviderKind>,
        last_error: String,
        at: DateTime<Utc>,
    },

    #[error("no routing providers configured")]
    NoProviders,
}

impl From<RoutingError> for AppError {
    fn from(err: RoutingError) -> Self {
        match &err {
            RoutingError::AllProvidersExhausted { failed, at, .. } => {
                AppError::with_message(ErrorCode::RoutingUnavailable, err.to_string())
                    .with_detail("failed_services", serde_json::json!(failed))
                    .with_detail("timestamp", at.to_rfc3339())
            }
            RoutingError::NoProviders => {
                AppError::with_message(ErrorCode::ConfigError, err.to_string())
            }
        }
    }
}

/// Resolves distances through a fixed registry of providers
///
/// Each attempt picks among the providers that have not yet failed during the
/// current call. Once every provider has failed, the remaining attempts draw
/// from the full registry again.
pub struct DistanceResolver {
    providers: Vec<Arc<dyn RouteProvider>>,
    policy: RetryPolicy,
    selector: Box<dyn ProviderSelector>,
}

impl DistanceResolver {
    pub fn new(providers: Vec<Arc<dyn RouteProvider>>, policy: RetryPolicy) -> Self {
        Self {
            providers,
            policy,
            selector: Box::new(RandomSelector),
        }
    }

    pub fn with_selector(mut self, selector: impl ProviderSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub async fn resolve(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TransportProfile,
    ) -> Result<DistanceResult, RoutingError> {
        if self.providers.is_empty() {
            return Err(RoutingError::NoProviders);
        }

        let attempts = self.policy.max_attempts.max(1);
        let mut failed: Vec<ProviderKind> = Vec::new();
        let mut last_error = String::new();

        for attempt in 0..attempts {
            let healthy: Vec<&Arc<dyn RouteProvider>> = self
                .providers
                .iter()
                .filter(|p| !failed.contains(&p.kind()))
                .collect();
            let candidates = if healthy.is_empty() {
                self.providers.iter().collect()
            } else {
                healthy
            };

            let index = self.selector.select(candidates.len()).min(candidates.len() - 1);
            let provider = candidates[index];
            let kind = provider.kind();

            match provider.route(origin, destination, profile).await {
                Ok(route) => {
                    tracing::debug!(
                        provider = %kind,
                        attempt = attempt + 1,
                        distance_m = route.distance_meters,
                        "Distance resolved"
                    );
                    return Ok(DistanceResult {
                        distance_meters: route.distance_meters,
                        duration_seconds: route.duration_seconds,
                        provider_used: kind,
                        resolved_at: Utc::now(),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        provider = %kind,
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        error = %e,
                        "Routing provider failed"
                    );
                    if !failed.contains(&kind) {
                        failed.push(kind);
                    }
                    last_error = e.to_string();

                    if attempt + 1 < attempts {
                        tokio::time::sleep(self.policy.delay_after(attempt)).await;
                    }
                }
            }
        }

        Err(RoutingError::AllProvidersExhausted {
            attempts,
            failed,
            last_error,
            at: Utc::now(),
        })
    }
}
