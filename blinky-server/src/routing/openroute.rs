//! OpenRouteService directions adapter (coordinates in the body, key in `Authorization`)

use async_trait::async_trait;
use serde::Deserialize;
use shared::models::{Coordinate, TransportProfile};

use super::provider::{ProviderError, ProviderKind, Route, RouteProvider, reject_status};

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

pub struct OpenRouteProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    distance: f64,
    duration: Option<f64>,
}

impl OpenRouteProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn profile_name(profile: TransportProfile) -> &'static str {
        match profile {
            TransportProfile::Driving | TransportProfile::DrivingCar => "driving-car",
            TransportProfile::Walking | TransportProfile::FootWalking => "foot-walking",
            TransportProfile::Cycling | TransportProfile::CyclingRegular => "cycling-regular",
        }
    }
}

/// `[[lng, lat], [lng, lat]]`
fn request_body(origin: Coordinate, destination: Coordinate) -> serde_json::Value {
    serde_json::json!({
        "coordinates": [
            [origin.longitude, origin.latitude],
            [destination.longitude, destination.latitude],
        ]
    })
}

/// Extract the first segment of the first feature
fn parse_directions(body: &[u8]) -> Result<Route, ProviderError> {
    let resp: DirectionsResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let segment = resp
        .features
        .into_iter()
        .next()
        .and_then(|f| f.properties.segments.into_iter().next())
        .ok_or_else(|| ProviderError::Malformed("no route segment in response".into()))?;
    Ok(Route {
        distance_meters: segment.distance,
        duration_seconds: segment.duration,
    })
}

#[async_trait]
impl RouteProvider for OpenRouteProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRoute
    }

    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TransportProfile,
    ) -> Result<Route, ProviderError> {
        let url = format!(
            "{}/v2/directions/{}",
            self.base_url,
            Self::profile_name(profile)
        );
        let resp = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .header(
                reqwest::header::ACCEPT,
                "application/json, application/geo+json",
            )
            .json(&request_body(origin, destination))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(reject_status(resp).await);
        }

        let body = resp.bytes().await?;
        parse_directions(&body)
    }
}
