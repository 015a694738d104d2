//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::StoreSiteNotFound
            | Self::OrderNotFound
            | Self::ProductNotFound
            | Self::CustomerNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::DailyOrderLimitReached => StatusCode::CONFLICT,

            // 422 Unprocessable (referenced data exists but cannot be priced)
            Self::StoreSiteLocationMissing | Self::ProductInvalidPrice => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 502 Bad Gateway (upstream routing services)
            Self::RoutingUnavailable => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError | Self::OrderCreationFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request
            Self::ValidationFailed | Self::ValueOutOfRange => StatusCode::BAD_REQUEST,
        }
    }
}
