//! Routing provider seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Coordinate, TransportProfile};
use std::fmt;
use thiserror::Error;

/// Identifier of an external routing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mapbox,
    #[serde(rename = "openroute")]
    OpenRoute,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mapbox => "mapbox",
            Self::OpenRoute => "openroute",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distance and duration of the best route between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub distance_meters: f64,
    pub duration_seconds: Option<f64>,
}

/// Failure of a single provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Malformed(String),
}

/// One external routing service
#[async_trait]
pub trait RouteProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        profile: TransportProfile,
    ) -> Result<Route, ProviderError>;
}

/// Read a non-2xx body into a [`ProviderError::Status`]
pub(super) async fn reject_status(resp: reqwest::Response) -> ProviderError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    ProviderError::Status { status, body }
}
