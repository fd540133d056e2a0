//! Error types for transaction checking.

use ledger_ops_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur while checking transactions.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The transaction or one of its operations is malformed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Encoding or decoding failed.
    #[error("codec error: {0}")]
    Core(#[from] CoreError),

    /// The transaction carries more operations than the checker accepts.
    #[error("transaction has {count} operations, maximum is {max}")]
    TooManyOperations { count: usize, max: usize },

    /// A blocking check task panicked or was cancelled.
    #[error("check task failed: {0}")]
    TaskFailed(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for checker operations.
pub type Result<T> = std::result::Result<T, CheckError>;
