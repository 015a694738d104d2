//! Unified error codes for the Blinky marketplace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Store site errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors
//! - 7xxx: Customer errors
//! - 8xxx: Routing errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Store site ====================
    /// Store site not found
    StoreSiteNotFound = 3001,
    /// Store site has no latitude/longitude
    StoreSiteLocationMissing = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order could not be persisted
    OrderCreationFailed = 4002,
    /// Per-site daily order sequence is exhausted
    DailyOrderLimitReached = 4003,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,

    // ==================== 7xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 7001,

    // ==================== 8xxx: Routing ====================
    /// Every routing provider failed
    RoutingUnavailable = 8001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Store site
            ErrorCode::StoreSiteNotFound => "Store site not found",
            ErrorCode::StoreSiteLocationMissing => "Store site location not found",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderCreationFailed => "Failed to create order",
            ErrorCode::DailyOrderLimitReached => "Daily order limit exceeded",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",

            // Routing
            ErrorCode::RoutingUnavailable => "All routing services failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Store site
            3001 => Ok(ErrorCode::StoreSiteNotFound),
            3002 => Ok(ErrorCode::StoreSiteLocationMissing),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderCreationFailed),
            4003 => Ok(ErrorCode::DailyOrderLimitReached),

            // Catalog
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),

            // Customer
            7001 => Ok(ErrorCode::CustomerNotFound),

            // Routing
            8001 => Ok(ErrorCode::RoutingUnavailable),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
