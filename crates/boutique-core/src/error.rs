//! # Error Types
//!
//! Domain errors for boutique-core.
//!
//! ## Error Hierarchy
//! ```text
//! boutique-core   ValidationError  - malformed input
//!                 CoreError        - business rule violations
//! boutique-db     DbError          - storage faults (separate crate)
//! boutique-engine EngineError      - what the form layer sees
//!
//! Flow: ValidationError → CoreError → EngineError → UI message
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derives, never manual `impl Display`
//! 2. Context fields in every variant (ids, names, amounts)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Requested quantity exceeds live stock.
    ///
    /// Raised both at add-to-cart time (against the persisted quantity read
    /// at that moment) and again inside the checkout transaction, where the
    /// guarded decrement closes the staleness window between the two.
    #[error("insufficient stock for '{product_name}' (id {product_id}): available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        product_name: String,
        available: i64,
        requested: i64,
    },

    /// Cart line index out of range for `remove_line`.
    #[error("no cart line at index {index} (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// Checkout was attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Input validation failure (wraps [`ValidationError`]).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Malformed input, caught before any business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Value must be strictly positive (prices, quantities to sell).
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must not be negative (stock levels).
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: &'static str },

    /// Numeric value above the allowed maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: i64 },

    /// Invalid format (e.g. an email with no '@').
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

/// Convenience alias for results carrying [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_names_the_product() {
        let err = CoreError::InsufficientStock {
            product_id: 3,
            product_name: "Kids Dress".to_string(),
            available: 15,
            requested: 20,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for 'Kids Dress' (id 3): available 15, requested 20"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let err: CoreError = ValidationError::Required { field: "name" }.into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(err.to_string(), "name is required");
    }
}
