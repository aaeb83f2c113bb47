//! # Validation Module
//!
//! Input validation for catalog entries, cart quantities, and registration
//! forms. The storage layer repeats the critical numeric rules as CHECK and
//! UNIQUE constraints; this module exists so bad input fails early with a
//! field-level message instead of a constraint error.

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog
// =============================================================================

/// Validates a product name: non-empty after trimming.
///
/// Returns the trimmed name so callers persist a canonical form.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    Ok(name.to_string())
}

/// Validates a price in minor units: strictly positive.
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price <= 0 {
        return Err(ValidationError::MustBePositive { field: "price" });
    }
    Ok(())
}

/// Validates a stock level: zero is fine, negative is not.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "quantity" });
    }
    Ok(())
}

/// Validates a quantity to sell: strictly positive and within the per-line
/// cap.
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "quantity",
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Registration
// =============================================================================

/// Validates a username: at least 3 characters after trimming.
pub fn validate_username(username: &str) -> ValidationResult<String> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required { field: "username" });
    }

    if username.chars().count() < 3 {
        return Err(ValidationError::TooShort {
            field: "username",
            min: 3,
        });
    }

    Ok(username.to_string())
}

/// Validates a clear-text password at registration: at least 6 characters.
/// Hashing happens after validation, in the engine.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }

    if password.chars().count() < 6 {
        return Err(ValidationError::TooShort {
            field: "password",
            min: 6,
        });
    }

    Ok(())
}

/// Validates a full name: non-empty after trimming.
pub fn validate_full_name(full_name: &str) -> ValidationResult<String> {
    let full_name = full_name.trim();

    if full_name.is_empty() {
        return Err(ValidationError::Required { field: "full_name" });
    }

    Ok(full_name.to_string())
}

/// Shallow email shape check: must contain '@' and '.'.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }

    if !email.contains('@') || !email.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "expected an address like name@example.com",
        });
    }

    Ok(email.to_string())
}
