//! PostgreSQL implementation of the order pipeline store

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{
    Customer, ModifierOption, Order, OrderDetail, OrderItem, OrderItemDetail, OrderItemOption,
    Product, StoreSite,
};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use super::{BoxError, Catalog, OrderStore, OrderTx};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ── Catalog reads (pool or transaction) ──

async fn fetch_customer<'e>(
    ex: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        "SELECT id, email, name, phone_number FROM store_customers WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(ex)
    .await
}

async fn fetch_store_site<'e>(
    ex: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<StoreSite>, sqlx::Error> {
    sqlx::query_as::<_, StoreSite>(
        "SELECT id, store_id, name, address, phone, latitude, longitude FROM store_sites WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(ex)
    .await
}

async fn fetch_product<'e>(
    ex: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT id, store_id, name, description, price, enabled FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(ex)
    .await
}

async fn fetch_modifier_option<'e>(
    ex: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<Option<ModifierOption>, sqlx::Error> {
    sqlx::query_as::<_, ModifierOption>(
        "SELECT id, product_id, name, price FROM modifier_options WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(ex)
    .await
}

#[async_trait]
impl Catalog for PgStore {
    async fn customer(&self, id: Uuid) -> Result<Option<Customer>, BoxError> {
        Ok(fetch_customer(&self.pool, id).await?)
    }

    async fn store_site(&self, id: Uuid) -> Result<Option<StoreSite>, BoxError> {
        Ok(fetch_store_site(&self.pool, id).await?)
    }

    async fn product(&self, id: Uuid) -> Result<Option<Product>, BoxError> {
        Ok(fetch_product(&self.pool, id).await?)
    }

    async fn modifier_option(&self, id: Uuid) -> Result<Option<ModifierOption>, BoxError> {
        Ok(fetch_modifier_option(&self.pool, id).await?)
    }
}

// ── Order reads ──

const ORDER_COLUMNS: &str = "id, customer_id, store_site_id, order_code, delivery_address, \
     delivery_latitude, delivery_longitude, special_instructions, total_amount, items_amount, \
     tax_amount, service_fee, delivery_price, approximated_distance, status, created_at";

#[async_trait]
impl OrderStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn OrderTx>, BoxError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgOrderTx { tx }))
    }

    async fn order_detail(&self, id: Uuid) -> Result<Option<OrderDetail>, BoxError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let Some(order) = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let items: Vec<OrderItem> = sqlx::query_as(
            "SELECT id, order_id, product_id, product_name, base_price, quantity \
             FROM order_items WHERE order_id = $1 ORDER BY seq",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let item_ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        let options: Vec<OrderItemOption> = sqlx::query_as(
            "SELECT id, order_item_id, modifier_option_id, option_name, option_price, quantity \
             FROM order_item_options WHERE order_item_id = ANY($1) ORDER BY seq",
        )
        .bind(&item_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_item: HashMap<Uuid, Vec<OrderItemOption>> = HashMap::new();
        for option in options {
            by_item.entry(option.order_item_id).or_default().push(option);
        }

        let customer = fetch_customer(&self.pool, order.customer_id)
            .await?
            .ok_or_else(|| format!("customer {} missing for order {id}", order.customer_id))?;
        let store_site = fetch_store_site(&self.pool, order.store_site_id)
            .await?
            .ok_or_else(|| format!("store site {} missing for order {id}", order.store_site_id))?;

        let items = items
            .into_iter()
            .map(|item| OrderItemDetail {
                options: by_item.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect();

        Ok(Some(OrderDetail {
            order,
            items,
            customer,
            store_site,
        }))
    }
}

// ── Unit of work ──

pub struct PgOrderTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl OrderTx for PgOrderTx {
    async fn customer(&mut self, id: Uuid) -> Result<Option<Customer>, BoxError> {
        Ok(fetch_customer(&mut *self.tx, id).await?)
    }

    async fn store_site(&mut self, id: Uuid) -> Result<Option<StoreSite>, BoxError> {
        Ok(fetch_store_site(&mut *self.tx, id).await?)
    }

    async fn product(&mut self, id: Uuid) -> Result<Option<Product>, BoxError> {
        Ok(fetch_product(&mut *self.tx, id).await?)
    }

    async fn modifier_option(&mut self, id: Uuid) -> Result<Option<ModifierOption>, BoxError> {
        Ok(fetch_modifier_option(&mut *self.tx, id).await?)
    }

    async fn next_daily_sequence(
        &mut self,
        store_site_id: Uuid,
        date: NaiveDate,
    ) -> Result<i32, BoxError> {
        let (sequence,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO store_site_daily_sequences (store_site_id, date, last_sequence)
            VALUES ($1, $2, 1)
            ON CONFLICT (store_site_id, date)
            DO UPDATE SET last_sequence = store_site_daily_sequences.last_sequence + 1
            RETURNING last_sequence
            "#,
        )
        .bind(store_site_id)
        .bind(date)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(sequence)
    }

    async fn insert_order(&mut self, order: &Order) -> Result<(), BoxError> {
        let sql = format!(
            "INSERT INTO orders ({ORDER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
        );
        sqlx::query(&sql)
            .bind(order.id)
            .bind(order.customer_id)
            .bind(order.store_site_id)
            .bind(&order.order_code)
            .bind(&order.delivery_address)
            .bind(order.delivery_latitude)
            .bind(order.delivery_longitude)
            .bind(&order.special_instructions)
            .bind(order.total_amount)
            .bind(order.items_amount)
            .bind(order.tax_amount)
            .bind(order.service_fee)
            .bind(order.delivery_price)
            .bind(order.approximated_distance)
            .bind(&order.status)
            .bind(order.created_at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn insert_item(&mut self, item: &OrderItem) -> Result<(), BoxError> {
        sqlx::query(
            "INSERT INTO order_items (id, order_id, product_id, product_name, base_price, quantity) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(item.id)
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.base_price)
        .bind(item.quantity)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn insert_item_option(&mut self, option: &OrderItemOption) -> Result<(), BoxError> {
        sqlx::query(
            "INSERT INTO order_item_options \
             (id, order_item_id, modifier_option_id, option_name, option_price, quantity) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(option.id)
        .bind(option.order_item_id)
        .bind(option.modifier_option_id)
        .bind(&option.option_name)
        .bind(option.option_price)
        .bind(option.quantity)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), BoxError> {
        let this = *self;
        this.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), BoxError> {
        let this = *self;
        this.tx.rollback().await?;
        Ok(())
    }
}
