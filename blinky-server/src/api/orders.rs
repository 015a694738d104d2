//! Order API
//!
//! POST /api/orders       create an order from a cart
//! GET  /api/orders/{id}  fetch an order with lines, options, customer and store site

use axum::Json;
use axum::extract::{Path, State};
use shared::error::ApiResponse;
use shared::models::{CreateOrderRequest, OrderDetail};
use uuid::Uuid;

use super::validate::validate_create_order;
use crate::error::{ServiceError, ServiceResult};
use crate::orders::OrderError;
use crate::state::AppState;

pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> ServiceResult<ApiResponse<OrderDetail>> {
    validate_create_order(&req)?;

    let detail = state.orders.create_order(&req).await?;
    Ok(ApiResponse::success(detail))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ServiceResult<ApiResponse<OrderDetail>> {
    let detail = state.orders.order_details(id).await.map_err(|e| match e {
        OrderError::Persistence(db_err) => ServiceError::Db(db_err),
        other => other.into(),
    })?;
    Ok(ApiResponse::success(detail))
}
