//! Error types shared across the vault

use thiserror::Error;

/// Errors that can occur in vault operations.
///
/// Every fallible operation returns one of these as a typed result; the
/// vault never aborts a call with an uncatchable fault. A failed
/// validation leaves the prior state entirely intact.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Idea not found: {0}")]
    NotFound(String),

    #[error("Caller lacks rights over the record")]
    Forbidden,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation not valid for current status: {0}")]
    InvalidState(String),

    #[error("Signature already recorded for this signer")]
    AlreadySigned,

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("Internal lock poisoned")]
    LockError,
}

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;
