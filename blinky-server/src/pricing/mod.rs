//! Cart pricing: items, tax, delivery and service fee

pub mod calculator;
pub mod estimator;

pub use calculator::PricingRates;
pub use estimator::PriceEstimator;

use thiserror::Error;
use uuid::Uuid;

use crate::db::BoxError;
use crate::routing::RoutingError;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("store site {0} not found")]
    StoreSiteNotFound(Uuid),

    #[error("store site {0} has no location")]
    LocationMissing(Uuid),

    #[error("product {0} not found")]
    ProductNotFound(Uuid),

    /// Catalog price (of the product or one of its options) is not a usable amount
    #[error("product {0} has an invalid price")]
    InvalidPrice(Uuid),

    #[error("price breakdown out of range")]
    OutOfRange,

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("catalog lookup failed: {0}")]
    Catalog(#[from] BoxError),
}
