//! Cart and checkout request payloads

use super::geo::Coordinate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Modifier option picked for a cart line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub modifier_option_id: Uuid,
    pub quantity: i32,
}

/// One product selection in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

/// Price estimation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimateRequest {
    pub store_site_id: Uuid,
    pub delivery_location: Coordinate,
    #[serde(default)]
    pub items: Vec<CartLine>,
}

/// Where the order is delivered
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub special_instructions: Option<String>,
}

impl DeliveryDetails {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Order creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub store_site_id: Uuid,
    #[serde(default)]
    pub items: Vec<CartLine>,
    pub delivery_details: DeliveryDetails,
}
