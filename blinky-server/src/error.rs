//! Unified service-layer error type for blinky-server
//!
//! `ServiceError` bridges the gap between store errors (`sqlx::Error`, `BoxError`),
//! the domain errors of routing, pricing and orders, and the API-layer error
//! (`AppError`). Handlers propagate all of them with `?`.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::BoxError;
use crate::orders::OrderError;
use crate::pricing::PricingError;

/// Service-layer error, two variants.
///
/// - `Db`: Database/infrastructure errors (auto-logged, mapped to InternalError)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error
    Db(BoxError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<PricingError> for ServiceError {
    fn from(e: PricingError) -> Self {
        match e {
            PricingError::StoreSiteNotFound(id) => AppError::store_site_not_found(id).into(),
            PricingError::LocationMissing(id) => AppError::new(ErrorCode::StoreSiteLocationMissing)
                .with_detail("store_site_id", id.to_string())
                .into(),
            PricingError::ProductNotFound(id) => AppError::product_not_found(id).into(),
            PricingError::InvalidPrice(id) => AppError::new(ErrorCode::ProductInvalidPrice)
                .with_detail("product_id", id.to_string())
                .into(),
            PricingError::OutOfRange => AppError::new(ErrorCode::ValueOutOfRange).into(),
            PricingError::Routing(e) => ServiceError::App(e.into()),
            PricingError::Catalog(e) => ServiceError::Db(e),
        }
    }
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::CustomerNotFound(id) => AppError::customer_not_found(id).into(),
            OrderError::StoreSiteNotFound(id) => AppError::store_site_not_found(id).into(),
            OrderError::SequenceExhausted {
                store_site_id,
                date,
            } => AppError::new(ErrorCode::DailyOrderLimitReached)
                .with_detail("store_site_id", store_site_id.to_string())
                .with_detail("date", date.to_string())
                .into(),
            OrderError::Pricing(e) => e.into(),
            OrderError::NotFound(id) => AppError::order_not_found(id).into(),
            OrderError::Persistence(db_err) => {
                tracing::error!(error = %db_err, "Order persistence failed");
                AppError::new(ErrorCode::OrderCreationFailed).into()
            }
            OrderError::ReadBack { order_id, error } => {
                tracing::error!(order_id = %order_id, "Committed order could not be read back");
                ServiceError::Db(error)
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{ProviderKind, RoutingError};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn code_of(e: impl Into<ServiceError>) -> ErrorCode {
        let err: ServiceError = e.into();
        AppError::from(err).code
    }

    #[test]
    fn test_pricing_error_codes() {
        let id = Uuid::new_v4();
        assert_eq!(
            code_of(PricingError::StoreSiteNotFound(id)),
            ErrorCode::StoreSiteNotFound
        );
        assert_eq!(
            code_of(PricingError::LocationMissing(id)),
            ErrorCode::StoreSiteLocationMissing
        );
        assert_eq!(
            code_of(PricingError::ProductNotFound(id)),
            ErrorCode::ProductNotFound
        );
        assert_eq!(
            code_of(PricingError::InvalidPrice(id)),
            ErrorCode::ProductInvalidPrice
        );
        assert_eq!(code_of(PricingError::OutOfRange), ErrorCode::ValueOutOfRange);
        assert_eq!(
            code_of(PricingError::Catalog("connection reset".into())),
            ErrorCode::InternalError
        );
    }

    #[test]
    fn test_routing_exhaustion_keeps_its_code_through_orders() {
        let routing = RoutingError::AllProvidersExhausted {
            attempts: 3,
            failed: vec![ProviderKind::Mapbox],
            last_error: "timeout".to_string(),
            at: Utc::now(),
        };
        let err = AppError::from(ServiceError::from(OrderError::Pricing(routing.into())));
        assert_eq!(err.code, ErrorCode::RoutingUnavailable);
        assert!(err.details.unwrap().contains_key("failed_services"));
    }

    #[test]
    fn test_order_error_codes() {
        let id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 10, 17).unwrap();
        assert_eq!(
            code_of(OrderError::CustomerNotFound(id)),
            ErrorCode::CustomerNotFound
        );
        assert_eq!(
            code_of(OrderError::SequenceExhausted {
                store_site_id: id,
                date
            }),
            ErrorCode::DailyOrderLimitReached
        );
        assert_eq!(
            code_of(OrderError::Persistence("disk full".into())),
            ErrorCode::OrderCreationFailed
        );
        assert_eq!(code_of(OrderError::NotFound(id)), ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_read_back_failure_is_not_a_failed_order() {
        let err = OrderError::ReadBack {
            order_id: Uuid::new_v4(),
            error: "connection reset".into(),
        };
        assert!(matches!(ServiceError::from(err), ServiceError::Db(_)));

        let err = OrderError::ReadBack {
            order_id: Uuid::new_v4(),
            error: "connection reset".into(),
        };
        assert_eq!(code_of(err), ErrorCode::InternalError);
    }
}
