//! Unified error handling for store operations.
//!
//! Provides a single error type for every repository operation, with
//! conversion from domain key errors.

use domain::DomainError;
use thiserror::Error;

/// Store error types.
#[derive(Error, Debug)]
pub enum StoreError {
    // Argument errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Resource errors
    #[error("Entity not found")]
    NotFound,

    #[error("Key {0} already exists")]
    DuplicateKey(String),

    // Control flow
    #[error("Operation cancelled")]
    Cancelled,

    // Seeding
    #[error("Invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

impl StoreError {
    /// Get a stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::InvalidArgument(_) => "INVALID_ARGUMENT",
            StoreError::NotFound => "NOT_FOUND",
            StoreError::DuplicateKey(_) => "DUPLICATE_KEY",
            StoreError::Cancelled => "CANCELLED",
            StoreError::Fixture(_) => "FIXTURE_ERROR",
        }
    }

    /// True for errors caused by the caller's arguments rather than store state
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StoreError::InvalidArgument(_))
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidKey(msg) => StoreError::InvalidArgument(msg),
            DomainError::KeyArity(n) => StoreError::InvalidArgument(format!(
                "expected exactly one key, got {} (composite keys are not supported)",
                n
            )),
        }
    }
}

/// Result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Extension trait for Option -> StoreError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> StoreResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> StoreResult<T> {
        self.ok_or(StoreError::NotFound)
    }
}

/// Convenience constructors
impl StoreError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        StoreError::InvalidArgument(msg.into())
    }

    pub fn duplicate_key(key: impl std::fmt::Display) -> Self {
        StoreError::DuplicateKey(key.to_string())
    }
}
