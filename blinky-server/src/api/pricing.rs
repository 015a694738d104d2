//! Price estimation API
//!
//! POST /api/pricing/estimate: price a cart delivered from a store site

use axum::Json;
use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::{PriceEstimate, PriceEstimateRequest};

use super::validate::validate_estimate_request;
use crate::error::ServiceResult;
use crate::state::AppState;

pub async fn estimate(
    State(state): State<AppState>,
    Json(req): Json<PriceEstimateRequest>,
) -> ServiceResult<ApiResponse<PriceEstimate>> {
    validate_estimate_request(&req)?;

    let estimate = state
        .estimator
        .estimate(req.store_site_id, req.delivery_location, &req.items)
        .await?;

    Ok(ApiResponse::success(estimate))
}
