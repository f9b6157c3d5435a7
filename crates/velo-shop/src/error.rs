//! # Shop Error Types
//!
//! The error taxonomy callers of the service layer see.
//!
//! ## Taxonomy
//! ```text
//! InvalidArgument  caller can fix the input and retry
//! NotFound         product / option / cart line does not exist or is inactive
//! Conflict         business rule violation (duplicate price rule,
//!                  incompatible option selection, ...)
//! Integrity        corrupted reference data; a defect, not a user error
//! ```
//! Nothing in this layer is retried automatically: there are no transient
//! failure classes inside pure evaluation, and any retry policy belongs to
//! whoever owns the transport.

use serde::Serialize;
use thiserror::Error;

use velo_core::{CoreError, ValidationError};
use velo_store::StoreError;

/// Coarse error classes for transport layers to map onto status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Conflict,
    Integrity,
}

/// Service-layer errors with user-facing messages.
#[derive(Debug, Error)]
pub enum ShopError {
    /// A validate/price call arrived without a product or any options.
    #[error("Product ID and at least one option ID are required")]
    MissingSelection,

    /// Product lookup failed on a pricing call.
    #[error("Product with ID {0} not found")]
    ProductNotFound(String),

    /// Product lookup failed on a cart call (inactive products read the
    /// same as missing ones).
    #[error("Product with ID {0} not found or not active.")]
    ProductUnavailable(String),

    /// A referenced product option does not exist.
    #[error("Product option with ID {0} not found")]
    OptionNotFound(String),

    /// Price rule creation referenced a missing target option.
    #[error("Target option {0} not found")]
    TargetOptionNotFound(String),

    /// Price rule creation referenced a missing dependent option.
    #[error("Dependent option {0} not found")]
    DependentOptionNotFound(String),

    #[error("Cannot create a price rule with the same option as target and dependent")]
    SelfReferentialPriceRule,

    #[error("A price rule already exists for these options")]
    DuplicatePriceRule,

    /// Cart add arrived with an empty option list.
    #[error("No options selected for the product.")]
    NoOptionsSelected,

    /// The selection violates at least one compatibility rule.
    #[error("One or more selected options are invalid.")]
    InvalidOptionSelection,

    #[error("Cart not found for this user.")]
    CartNotFound,

    #[error("Cart item with ID {0} not found in your cart.")]
    CartItemNotFound(String),

    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Structural input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Corrupted reference data reached the engine.
    #[error(transparent)]
    Integrity(#[from] CoreError),

    /// Storage boundary failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShopError {
    /// The coarse class of this error, for status-code mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::MissingSelection
            | ShopError::NoOptionsSelected
            | ShopError::Validation(_) => ErrorKind::InvalidArgument,

            ShopError::ProductNotFound(_)
            | ShopError::ProductUnavailable(_)
            | ShopError::OptionNotFound(_)
            | ShopError::TargetOptionNotFound(_)
            | ShopError::DependentOptionNotFound(_)
            | ShopError::CartNotFound
            | ShopError::CartItemNotFound(_) => ErrorKind::NotFound,

            ShopError::SelfReferentialPriceRule
            | ShopError::DuplicatePriceRule
            | ShopError::InvalidOptionSelection
            | ShopError::CartTooLarge { .. } => ErrorKind::Conflict,

            ShopError::Integrity(CoreError::Validation(_)) => ErrorKind::InvalidArgument,
            ShopError::Integrity(_) => ErrorKind::Integrity,

            ShopError::Store(StoreError::Duplicate { .. }) => ErrorKind::Conflict,
            ShopError::Store(_) => ErrorKind::NotFound,
        }
    }
}

/// Result type for service operations.
pub type ShopResult<T> = Result<T, ShopError>;
