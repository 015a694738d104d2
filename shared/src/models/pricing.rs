//! Price estimation output

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary components of a cart, each rounded to 2 decimal places
///
/// `total` is the sum of the four rounded components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub items_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Full estimate returned by the pricing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimate {
    pub breakdown: PriceBreakdown,
    /// Route distance in meters
    pub approximated_distance: f64,
    pub currency: String,
}
