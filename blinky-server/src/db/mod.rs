//! Persistence seams for the order pipeline
//!
//! [`Catalog`] serves read-only lookups outside any transaction.
//! [`OrderStore::begin`] opens an [`OrderTx`], the unit of work used for
//! order creation: nothing it writes is visible until [`OrderTx::commit`],
//! and [`OrderTx::rollback`] (or dropping it) discards every write.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{
    Customer, ModifierOption, Order, OrderDetail, OrderItem, OrderItemOption, Product, StoreSite,
};
use uuid::Uuid;

pub use postgres::PgStore;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn customer(&self, id: Uuid) -> Result<Option<Customer>, BoxError>;
    async fn store_site(&self, id: Uuid) -> Result<Option<StoreSite>, BoxError>;
    async fn product(&self, id: Uuid) -> Result<Option<Product>, BoxError>;
    async fn modifier_option(&self, id: Uuid) -> Result<Option<ModifierOption>, BoxError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn OrderTx>, BoxError>;

    /// Order joined with its lines, options, customer and store site
    async fn order_detail(&self, id: Uuid) -> Result<Option<OrderDetail>, BoxError>;
}

#[async_trait]
pub trait OrderTx: Send {
    async fn customer(&mut self, id: Uuid) -> Result<Option<Customer>, BoxError>;
    async fn store_site(&mut self, id: Uuid) -> Result<Option<StoreSite>, BoxError>;
    async fn product(&mut self, id: Uuid) -> Result<Option<Product>, BoxError>;
    async fn modifier_option(&mut self, id: Uuid) -> Result<Option<ModifierOption>, BoxError>;

    /// Atomically bump the (site, date) counter and return the new value
    ///
    /// The first call for a pair yields 1. The counter row stays locked
    /// until this unit of work ends.
    async fn next_daily_sequence(
        &mut self,
        store_site_id: Uuid,
        date: NaiveDate,
    ) -> Result<i32, BoxError>;

    async fn insert_order(&mut self, order: &Order) -> Result<(), BoxError>;
    async fn insert_item(&mut self, item: &OrderItem) -> Result<(), BoxError>;
    async fn insert_item_option(&mut self, option: &OrderItemOption) -> Result<(), BoxError>;

    async fn commit(self: Box<Self>) -> Result<(), BoxError>;
    async fn rollback(self: Box<Self>) -> Result<(), BoxError>;
}
