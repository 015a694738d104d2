//! Data models
//!
//! Shared between blinky-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `Uuid` (PostgreSQL `uuid`).

pub mod cart;
pub mod catalog;
pub mod geo;
pub mod order;
pub mod pricing;

// Re-exports
pub use cart::*;
pub use catalog::*;
pub use geo::*;
pub use order::*;
pub use pricing::*;
