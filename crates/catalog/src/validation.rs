//! Product rules shared by the JSON API and the upstream sync.
//!
//! Request DTOs implement `validator::Validate` on top of these functions and
//! the reconciler runs the same checks on every candidate, so a rule changes
//! in exactly one place.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 255;
/// Upper price bound in whole units.
pub const PRICE_MAX: i64 = 999_999_999_999;
/// Digits after the decimal point the price column keeps.
pub const PRICE_SCALE: u32 = 2;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(error("required", "Product name must not be empty."));
    }
    if trimmed.chars().count() < NAME_MIN_CHARS {
        return Err(error("length", "Product name must be at least 3 characters."));
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(error("length", "Product name must be at most 255 characters."));
    }

    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(error("range", "Price must be greater than 0."));
    }
    if price > Decimal::from(PRICE_MAX) {
        return Err(error("range", "Price is too large."));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(error("scale", "Price can have at most 2 decimal places."));
    }

    Ok(())
}

pub fn validate_category_id(category_id: i32) -> Result<(), ValidationError> {
    if category_id < 1 {
        return Err(error("required", "Category must be selected."));
    }
    Ok(())
}

pub fn validate_status_id(status_id: i32) -> Result<(), ValidationError> {
    if status_id < 1 {
        return Err(error("required", "Status must be selected."));
    }
    Ok(())
}

/// Category and status names arriving from sync are created on demand, so
/// they only need to fit the column.
pub fn validate_reference_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(error("required", "Name must not be empty."));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(error("length", "Name must be at most 255 characters."));
    }
    Ok(())
}

/// Checks shared by create and update requests.
pub fn validate_product_fields(
    name: &str,
    price: Decimal,
    category_id: i32,
    status_id: i32,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(e) = validate_product_name(name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_price(price) {
        errors.add("price", e);
    }
    if let Err(e) = validate_category_id(category_id) {
        errors.add("category_id", e);
    }
    if let Err(e) = validate_status_id(status_id) {
        errors.add("status_id", e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks applied to an upstream candidate before anything is written.
pub fn validate_candidate_fields(
    name: &str,
    price: Decimal,
    category: &str,
    status: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(e) = validate_product_name(name) {
        errors.add("name", e);
    }
    if let Err(e) = validate_price(price) {
        errors.add("price", e);
    }
    if let Err(e) = validate_reference_name(category) {
        errors.add("category", e);
    }
    if let Err(e) = validate_reference_name(status) {
        errors.add("status", e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Flattens errors into `field: message` lines, sorted by field.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                format!("{field}: {message}")
            })
        })
        .collect();

    messages.sort();
    messages
}
