//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input, negative quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A document number or entity code already exists.
    #[error("duplicate number: {0}")]
    DuplicateNumber(String),

    /// A referenced entity is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// A stock decrement would take the product below zero.
    #[error("insufficient stock for {product}: required {required}, available {available}")]
    InsufficientStock {
        product: String,
        required: i64,
        available: i64,
    },

    /// The requested state change is not permitted from the current state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// The caller lacks the required permission.
    #[error("permission denied: missing '{0}'")]
    PermissionDenied(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(number: impl Into<String>) -> Self {
        Self::DuplicateNumber(number.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn permission_denied(permission: impl Into<String>) -> Self {
        Self::PermissionDenied(permission.into())
    }

    pub fn insufficient_stock(product: impl Into<String>, required: i64, available: i64) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            required,
            available,
        }
    }
}
