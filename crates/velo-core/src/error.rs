//! # Error Types
//!
//! Domain-specific error types for velo-core.
//!
//! ## Error Hierarchy
//! ```text
//! velo-core errors (this file)
//! |-- CoreError        - Rule-engine and domain faults
//! `-- ValidationError  - Input validation failures
//!
//! velo-store errors (separate crate)
//! `-- StoreError       - Catalog/cart storage failures
//!
//! velo-shop errors (separate crate)
//! `-- ShopError        - What a caller of the service layer sees
//! ```
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual Display impls
//! 2. Errors carry the identifying context (option id, rule type string)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

/// Core rule-engine errors.
///
/// `UnknownRuleKind` deserves a note: rule rows are reference data written by
/// catalog administration, so an unrecognized rule-type string means the
/// reference data itself is corrupt. It is raised where external data enters
/// the engine (parsing, never evaluation) and must not be swallowed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A rule-type string from reference data matched no known rule kind.
    #[error("Unhandled rule type: {0}")]
    UnknownRuleKind(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// Raised before business logic runs, when caller-supplied values do not meet
/// structural requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// A monetary amount is below zero.
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },
}

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
