//! Validation utilities for the Shamba farm records platform
//!
//! Pure field checks shared by every write path. Services map the error
//! strings onto their own error type.

use chrono::NaiveDate;
use rust_decimal::Decimal;

// ============================================================================
// Text Field Validations
// ============================================================================

/// Validate a display name is present and fits the column
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty");
    }
    if name.len() > 200 {
        return Err("Name must be at most 200 characters");
    }
    Ok(())
}

/// Validate a free-text description is present
pub fn validate_description(description: &str) -> Result<(), &'static str> {
    if description.trim().is_empty() {
        return Err("Description cannot be empty");
    }
    Ok(())
}

/// Validate an ear-tag identifier
pub fn validate_tag_number(tag: &str) -> Result<(), &'static str> {
    if tag.trim().is_empty() {
        return Err("Tag number cannot be empty");
    }
    if tag.len() > 50 {
        return Err("Tag number must be at most 50 characters");
    }
    Ok(())
}

// ============================================================================
// Numeric Validations
// ============================================================================

/// Validate a monetary amount is not negative
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate a physical quantity (kg, liters, acres) is not negative
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

/// Validate an offspring count is not negative
pub fn validate_count(count: i32) -> Result<(), &'static str> {
    if count < 0 {
        return Err("Count cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Date Validations
// ============================================================================

/// Validate a period runs forward (start on or before end)
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if start > end {
        return Err("Start date must be on or before end date");
    }
    Ok(())
}
