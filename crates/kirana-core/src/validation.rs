//! # Validation Module
//!
//! Field validation shared by the catalog/stock maintenance operations.
//!
//! Validators return [`CoreError`] directly so every rejection in the system
//! is one of the six domain error kinds; there is no separate validation
//! error layer.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a scanned code: non-blank after trimming.
pub fn validate_code(code: &str) -> CoreResult<()> {
    if code.trim().is_empty() {
        return Err(CoreError::InvalidProduct {
            reason: "code must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Validates a product or customer display name: non-blank after trimming.
pub fn validate_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::InvalidProduct {
            reason: "name must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Validates a customer phone number.
///
/// Stored verbatim; the only rule is non-blank.
pub fn validate_phone(phone: &str) -> CoreResult<()> {
    if phone.trim().is_empty() {
        return Err(CoreError::InvalidProduct {
            reason: "phone must not be empty".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price: strictly positive.
pub fn validate_price(price: Money) -> CoreResult<()> {
    if !price.is_positive() {
        return Err(CoreError::InvalidProduct {
            reason: "price must be positive".to_string(),
        });
    }
    Ok(())
}

/// Validates a cart quantity: a positive integer.
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty < 1 {
        return Err(CoreError::InvalidQuantity { value: qty });
    }
    Ok(())
}

/// Validates a stock level: zero is allowed, negative is not.
pub fn validate_stock_level(qty: i64) -> CoreResult<()> {
    if qty < 0 {
        return Err(CoreError::InvalidQuantity { value: qty });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
