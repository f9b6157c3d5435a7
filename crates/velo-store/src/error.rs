//! # Store Error Types
//!
//! Errors raised at the storage boundary.
//!
//! ## Error Flow
//! ```text
//! StoreError (this module)
//!      │
//!      ▼
//! ShopError (velo-shop) ← adds the user-facing message
//!      │
//!      ▼
//! HTTP layer maps ShopError::kind() onto a status code
//! ```

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An entity with this id already exists.
    #[error("{entity} with id {id} already exists")]
    Duplicate { entity: &'static str, id: String },

    /// A child record references a parent that does not exist, e.g. an
    /// option pointing at an unknown option group.
    #[error("{entity} references missing {parent}: {parent_id}")]
    MissingParent {
        entity: &'static str,
        parent: &'static str,
        parent_id: String,
    },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn duplicate(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::Duplicate {
            entity,
            id: id.into(),
        }
    }

    pub fn missing_parent(
        entity: &'static str,
        parent: &'static str,
        parent_id: impl Into<String>,
    ) -> Self {
        StoreError::MissingParent {
            entity,
            parent,
            parent_id: parent_id.into(),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = StoreError::not_found("ProductOption", "abc");
        assert_eq!(err.to_string(), "ProductOption not found: abc");

        let err = StoreError::missing_parent("ProductOption", "OptionGroup", "g1");
        assert_eq!(
            err.to_string(),
            "ProductOption references missing OptionGroup: g1"
        );
    }
}
