//! Request validation at the API boundary

use shared::error::AppError;
use shared::models::{CartLine, Coordinate, CreateOrderRequest, PriceEstimateRequest};

/// Maximum quantity per cart line
const MAX_QUANTITY: i32 = 9999;

/// Maximum length of a delivery address
const MAX_ADDRESS_LEN: usize = 255;

fn validate_coordinate(coordinate: Coordinate, field: &str) -> Result<(), AppError> {
    if !coordinate.is_valid() {
        return Err(AppError::validation(format!(
            "{field} must be a finite latitude/longitude within range, got {coordinate}"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a cart line before pricing
pub fn validate_cart_line(line: &CartLine) -> Result<(), AppError> {
    if line.quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {}",
            line.quantity
        )));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, line.quantity
        )));
    }
    for option in &line.selected_options {
        if option.quantity <= 0 {
            return Err(AppError::validation(format!(
                "option quantity must be positive, got {}",
                option.quantity
            ))
            .with_detail("modifier_option_id", option.modifier_option_id.to_string()));
        }
    }
    Ok(())
}

pub fn validate_estimate_request(req: &PriceEstimateRequest) -> Result<(), AppError> {
    validate_coordinate(req.delivery_location, "deliveryLocation")?;
    req.items.iter().try_for_each(validate_cart_line)
}

pub fn validate_create_order(req: &CreateOrderRequest) -> Result<(), AppError> {
    let delivery = &req.delivery_details;
    validate_coordinate(delivery.coordinate(), "deliveryDetails")?;

    let address = delivery.address.trim();
    if address.is_empty() {
        return Err(AppError::validation("delivery address must not be empty"));
    }
    if address.chars().count() > MAX_ADDRESS_LEN {
        return Err(AppError::validation(format!(
            "delivery address exceeds maximum length ({MAX_ADDRESS_LEN})"
        )));
    }

    req.items.iter().try_for_each(validate_cart_line)
}
