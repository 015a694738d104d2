//! Mapbox Directions API adapter (coordinates in the path, token in the query)

use async_trait::async_trait;
use serde::Deserialize;
use shared::models::{Coordinate, TransportProfile};

use super::provider::{ProviderError, ProviderKind, Route, RouteProvider, reject_status};

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

pub struct MapboxProvider {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    distance: f64,
    duration: Option<f64>,
}

impl MapboxProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn profile_name(profile: TransportProfile) -> &'static str {
        match profile {
            TransportProfile::Driving | TransportProfile::DrivingCar => "driving",
            TransportProfile::Walking | TransportProfile::FootWalking => "walking",
            TransportProfile::Cycling | TransportProfile::CyclingRegular => "cycling",
        }
    }

    fn directions_url(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TransportProfile,
    ) -> String {
        format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.base_url,
            Self::profile_name(profile),
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
        )
    }
}

/// Extract the first route from a Directions response body
fn parse_directions(body: &[u8]) -> Result<Route, ProviderError> {
    let resp: DirectionsResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let route = resp
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("no routes in response".into()))?;
    Ok(Route {
        distance_meters: route.distance,
        duration_seconds: route.duration,
    })
}

#[async_trait]
impl RouteProvider for MapboxProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mapbox
    }

    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TransportProfile,
    ) -> Result<Route, ProviderError> {
        let resp = self
            .client
            .get(self.directions_url(origin, destination, profile))
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("geometries", "geojson"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(reject_status(resp).await);
        }

        let body = resp.bytes().await?;
        parse_directions(&body)
    }
}
