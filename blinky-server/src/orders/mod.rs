//! Order creation
//!
//! A new order, its lines and their options are written in one unit of work
//! together with the daily sequence bump. Any failure rolls all of it back.

pub mod code;
pub mod service;

pub use service::OrderService;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::db::BoxError;
use crate::pricing::PricingError;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("customer {0} not found")]
    CustomerNotFound(Uuid),

    #[error("store site {0} not found")]
    StoreSiteNotFound(Uuid),

    #[error("daily order limit reached for store site {store_site_id} on {date}")]
    SequenceExhausted {
        store_site_id: Uuid,
        date: NaiveDate,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("order {0} not found")]
    NotFound(Uuid),

    #[error("order persistence failed: {0}")]
    Persistence(#[from] BoxError),

    /// The order is committed but reading it back failed
    #[error("order {order_id} committed but could not be read back: {error}")]
    ReadBack { order_id: Uuid, error: BoxError },
}
