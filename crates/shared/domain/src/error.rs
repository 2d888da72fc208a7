//! Domain-level errors.
//!
//! These errors describe invalid key arguments and entity identity problems.
//! They are independent of the store backing and of how callers report them.

use thiserror::Error;

/// Domain-specific errors for key and identity violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Key argument has the wrong shape or type for the target key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Wrong number of key arguments for a single-key lookup
    #[error("Expected exactly one key, got {0}")]
    KeyArity(usize),
}

impl DomainError {
    /// Create an invalid key error
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        DomainError::InvalidKey(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
