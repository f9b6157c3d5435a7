//! # Validation Module
//!
//! Structural checks on caller-supplied values, run before business logic.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: transport (HTTP/DTO)   type and presence checks
//! Layer 2: THIS MODULE            range and format checks
//! Layer 3: services               business rules (duplicates, rule
//!                                 conflicts, existence)
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_LINE_QUANTITY, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a cart line quantity: at least 1, at most [`MAX_LINE_QUANTITY`].
///
/// Zero is not an error at the service layer (it means "remove the line"),
/// so this runs only where a positive quantity is required.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 || quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a catalog price: zero is allowed, negative is not.
pub fn validate_price(field: &'static str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::NegativeAmount { field });
    }
    Ok(())
}

/// Validates a catalog name: non-empty after trimming, bounded length.
pub fn validate_name(field: &'static str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field });
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}
