//! # Engine Error Types
//!
//! The single error surface of the engine. Lower layers are folded in here:
//! validation failures from boutique-core, constraint and connection errors
//! from boutique-db, and checkout aborts from the commit transaction. A
//! caller never sees a raw sqlx error.

use boutique_core::{CoreError, ValidationError};
use boutique_db::{CheckoutError, DbError};

/// Convenient Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// All errors surfaced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Rejected input (bad name, non-positive price, short password, ...).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Requested quantity exceeds available stock, at staging or commit time.
    #[error("insufficient stock for '{product_name}': {available} available, {requested} requested")]
    InsufficientStock {
        product_id: i64,
        product_name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Cart line index out of range.
    #[error("cart line {index} out of range (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// Username is already taken, including the reserved owner name.
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The checkout transaction could not be committed.
    #[error("checkout commit failed: {0}")]
    CommitFailed(String),

    /// Invoice rendering failed. The sale itself is already committed.
    #[error("invoice rendering failed: {0}")]
    RenderFailed(String),

    /// Underlying storage error.
    #[error(transparent)]
    Storage(#[from] DbError),

    /// Unexpected internal failure, e.g. password hashing.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                product_id,
                product_name,
                available,
                requested,
            } => EngineError::InsufficientStock {
                product_id,
                product_name,
                available,
                requested,
            },
            CoreError::LineOutOfRange { index, len } => EngineError::LineOutOfRange { index, len },
            CoreError::EmptyCart => EngineError::EmptyCart,
            CoreError::Validation(e) => EngineError::Validation(e),
        }
    }
}

impl From<CheckoutError> for EngineError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::InsufficientStock {
                product_id,
                product_name,
                available,
                requested,
            } => EngineError::InsufficientStock {
                product_id,
                product_name,
                available,
                requested,
            },
            CheckoutError::ProductMissing(id) => EngineError::NotFound {
                entity: "product",
                id,
            },
            CheckoutError::Db(e) => EngineError::Storage(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_mapping() {
        let err: EngineError = CheckoutError::ProductMissing(7).into();
        assert!(matches!(
            err,
            EngineError::NotFound {
                entity: "product",
                id: 7
            }
        ));
    }

    #[test]
    fn test_insufficient_stock_message_names_product() {
        let err = EngineError::InsufficientStock {
            product_id: 1,
            product_name: "Kids Dress".to_string(),
            available: 2,
            requested: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("Kids Dress"));
        assert!(msg.contains('2'));
        assert!(msg.contains('3'));
    }
}
