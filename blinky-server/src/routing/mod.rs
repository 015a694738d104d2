//! Distance resolution over interchangeable routing providers

pub mod mapbox;
pub mod openroute;
pub mod policy;
pub mod provider;
pub mod resolver;

pub use mapbox::MapboxProvider;
pub use openroute::OpenRouteProvider;
pub use policy::{ProviderSelector, RandomSelector, RetryPolicy};
pub use provider::{ProviderError, ProviderKind, Route, RouteProvider};
pub use resolver::{DistanceResolver, DistanceResult, RoutingError};

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use shared::models::{Coordinate, TransportProfile};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serve `app` on an ephemeral local port, returning its base URL
    pub async fn spawn_stub(app: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Always picks the first candidate
    pub struct FirstSelector;

    impl ProviderSelector for FirstSelector {
        fn select(&self, _candidates: usize) -> usize {
            0
        }
    }

    /// Provider returning a fixed distance, or always failing
    pub struct FakeProvider {
        kind: ProviderKind,
        distance: Option<f64>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        pub fn ok(kind: ProviderKind, distance: f64) -> Arc<Self> {
            Arc::new(Self {
                kind,
                distance: Some(distance),
                calls: AtomicUsize::new(0),
            })
        }

        pub fn failing(kind: ProviderKind) -> Arc<Self> {
            Arc::new(Self {
                kind,
                distance: None,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RouteProvider for FakeProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn route(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
            _profile: TransportProfile,
        ) -> Result<Route, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.distance {
                Some(distance) => Ok(Route {
                    distance_meters: distance,
                    duration_seconds: Some(distance / 8.0),
                }),
                None => Err(ProviderError::Malformed(format!(
                    "{} stub failure",
                    self.kind
                ))),
            }
        }
    }

    /// Resolver over a single fake provider that always succeeds
    pub fn fixed_distance_resolver(distance: f64) -> DistanceResolver {
        DistanceResolver::new(
            vec![FakeProvider::ok(ProviderKind::Mapbox, distance) as Arc<dyn RouteProvider>],
            RetryPolicy::default(),
        )
    }

    /// Resolver whose every provider fails, with no backoff
    pub fn failing_resolver() -> DistanceResolver {
        DistanceResolver::new(
            vec![
                FakeProvider::failing(ProviderKind::Mapbox) as Arc<dyn RouteProvider>,
                FakeProvider::failing(ProviderKind::OpenRoute) as Arc<dyn RouteProvider>,
            ],
            RetryPolicy {
                max_attempts: 3,
                base_delay: std::time::Duration::ZERO,
            },
        )
    }
}
