//! Order creation service

use chrono::{DateTime, Utc};
use shared::models::{
    CreateOrderRequest, ORDER_STATUS_PENDING, Order, OrderDetail, OrderItem, OrderItemOption,
};
use std::sync::Arc;
use uuid::Uuid;

use super::OrderError;
use super::code::order_code;
use crate::db::{OrderStore, OrderTx};
use crate::pricing::calculator::to_money;
use crate::pricing::{PriceEstimator, PricingError};

pub struct OrderService {
    store: Arc<dyn OrderStore>,
    estimator: Arc<PriceEstimator>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, estimator: Arc<PriceEstimator>) -> Self {
        Self { store, estimator }
    }

    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderDetail, OrderError> {
        self.create_order_at(req, Utc::now()).await
    }

    /// Create an order as of `now`
    ///
    /// The daily sequence is keyed on the UTC date of `now`.
    pub async fn create_order_at(
        &self,
        req: &CreateOrderRequest,
        now: DateTime<Utc>,
    ) -> Result<OrderDetail, OrderError> {
        let mut tx = self.store.begin().await?;

        let order = match self.write_order(tx.as_mut(), req, now).await {
            Ok(order) => order,
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Order rollback failed");
                }
                tracing::error!(
                    customer_id = %req.customer_id,
                    store_site_id = %req.store_site_id,
                    error = %e,
                    "Order creation aborted"
                );
                return Err(e);
            }
        };

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            order_code = %order.order_code,
            total = %order.total_amount,
            "Order created"
        );

        // The order is committed; a failed read here is not a failed creation.
        match self.store.order_detail(order.id).await {
            Ok(Some(detail)) => Ok(detail),
            Ok(None) => Err(OrderError::ReadBack {
                order_id: order.id,
                error: "order missing after commit".into(),
            }),
            Err(error) => Err(OrderError::ReadBack {
                order_id: order.id,
                error,
            }),
        }
    }

    pub async fn order_details(&self, id: Uuid) -> Result<OrderDetail, OrderError> {
        self.store
            .order_detail(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    async fn write_order(
        &self,
        tx: &mut dyn OrderTx,
        req: &CreateOrderRequest,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        tx.customer(req.customer_id)
            .await?
            .ok_or(OrderError::CustomerNotFound(req.customer_id))?;
        tx.store_site(req.store_site_id)
            .await?
            .ok_or(OrderError::StoreSiteNotFound(req.store_site_id))?;

        let date = now.date_naive();
        let sequence = tx.next_daily_sequence(req.store_site_id, date).await?;
        let code = order_code(date, sequence).ok_or(OrderError::SequenceExhausted {
            store_site_id: req.store_site_id,
            date,
        })?;

        let delivery = &req.delivery_details;
        let estimate = self
            .estimator
            .estimate_in(&mut *tx, req.store_site_id, delivery.coordinate(), &req.items)
            .await?;
        let breakdown = estimate.breakdown;

        let order = Order {
            id: Uuid::new_v4(),
            customer_id: req.customer_id,
            store_site_id: req.store_site_id,
            order_code: code,
            delivery_address: delivery.address.clone(),
            delivery_latitude: delivery.latitude,
            delivery_longitude: delivery.longitude,
            special_instructions: delivery.special_instructions.clone(),
            total_amount: breakdown.total,
            items_amount: breakdown.items_total,
            tax_amount: breakdown.tax_amount,
            service_fee: breakdown.service_fee,
            delivery_price: breakdown.delivery_price,
            approximated_distance: estimate.approximated_distance,
            status: ORDER_STATUS_PENDING.to_string(),
            created_at: now.timestamp_millis(),
        };
        tx.insert_order(&order).await?;

        for line in &req.items {
            let Some(product) = tx.product(line.product_id).await? else {
                tracing::warn!(
                    order_code = %order.order_code,
                    product_id = %line.product_id,
                    "Product vanished before order write, skipping line"
                );
                continue;
            };

            let item = OrderItem {
                id: Uuid::new_v4(),
                order_id: order.id,
                product_id: Some(product.id),
                product_name: product.name,
                base_price: to_money(product.price)
                    .ok_or(PricingError::InvalidPrice(product.id))?,
                quantity: line.quantity,
            };
            tx.insert_item(&item).await?;

            for selected in &line.selected_options {
                let Some(option) = tx.modifier_option(selected.modifier_option_id).await? else {
                    continue;
                };
                tx.insert_item_option(&OrderItemOption {
                    id: Uuid::new_v4(),
                    order_item_id: item.id,
                    modifier_option_id: Some(option.id),
                    option_name: option.name,
                    option_price: to_money(option.price)
                        .ok_or(PricingError::InvalidPrice(product.id))?,
                    quantity: selected.quantity,
                })
                .await?;
            }
        }

        Ok(order)
    }
}
