//! Order Model
//!
//! Monetary fields are a snapshot taken at creation and never recomputed.

use super::catalog::{Customer, StoreSite};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status assigned to every new order
pub const ORDER_STATUS_PENDING: &str = "pending";

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub store_site_id: Uuid,
    /// `YYMMDD` + 4-digit daily sequence, e.g. `2410170042`
    pub order_code: String,
    pub delivery_address: String,
    pub delivery_latitude: f64,
    pub delivery_longitude: f64,
    pub special_instructions: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub items_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_price: Decimal,
    /// Route distance in meters
    pub approximated_distance: f64,
    pub status: String,
    pub created_at: i64,
}

/// Order line (product snapshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    /// Null once the product is deleted
    pub product_id: Option<Uuid>,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub quantity: i32,
}

/// Option attached to an order line (modifier snapshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemOption {
    pub id: Uuid,
    pub order_item_id: Uuid,
    pub modifier_option_id: Option<Uuid>,
    pub option_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub option_price: Decimal,
    pub quantity: i32,
}

/// Order line with its options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub options: Vec<OrderItemOption>,
}

/// Order joined with lines, customer and store site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    pub customer: Customer,
    pub store_site: StoreSite,
}
