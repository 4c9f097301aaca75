//! # Error Types
//!
//! Domain errors for kirana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  kirana-core errors (this file)                                │
//! │  └── CoreError   - the six recoverable domain error kinds      │
//! │                                                                │
//! │  kirana-store errors (separate crate)                          │
//! │  └── StoreError  - table I/O and decode failures               │
//! │                                                                │
//! │  Flow: CoreError → StoreError → one-line message in the CLI    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is locally recoverable: the triggering operation is
//! rejected, prior state is left unchanged, and the condition is surfaced
//! synchronously. There is no crash/abort path in the core.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A scanned or referenced code has no catalog entry (or no cart line,
    /// for quantity edits).
    #[error("Item not found: {0}")]
    NotFound(String),

    /// A product scan was rejected because its stock level is zero.
    #[error("Out of stock for {name}!")]
    OutOfStock { code: String, name: String },

    /// A quantity edit exceeds the current stock level.
    ///
    /// Carries the available amount so the UI can tell the operator how
    /// many are left.
    #[error("Not enough stock for {code}: only {available} left, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// A quantity was non-positive where a positive integer is required,
    /// or negative where zero is the floor (stock adjustments).
    #[error("Invalid quantity: {value}")]
    InvalidQuantity { value: i64 },

    /// A product upsert had an empty code/name or a non-positive price;
    /// a customer upsert had an empty code/name/phone.
    #[error("Invalid product: {reason}")]
    InvalidProduct { reason: String },

    /// The UPI profile is incomplete at bill time.
    #[error("Configure UPI details first")]
    ConfigurationMissing,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            code: "A1".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for A1: only 3 left, requested 5"
        );

        let err = CoreError::OutOfStock {
            code: "A1".to_string(),
            name: "Tea Dust".to_string(),
        };
        assert_eq!(err.to_string(), "Out of stock for Tea Dust!");

        assert_eq!(
            CoreError::NotFound("X9".to_string()).to_string(),
            "Item not found: X9"
        );
        assert_eq!(
            CoreError::ConfigurationMissing.to_string(),
            "Configure UPI details first"
        );
    }
}
