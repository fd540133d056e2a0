//! Error types for ledger operations.

use thiserror::Error;

use crate::ops::OperationKind;

/// Errors raised while encoding or decoding operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("unknown operation tag: {0}")]
    UnknownOperation(u16),
}

/// Structural validation failures.
///
/// Every variant is an ordinary rejected-input outcome; the caller decides
/// whether to reject the whole transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed field `{field}`: {reason}")]
    MalformedField { field: &'static str, reason: String },

    #[error("virtual operation {0} cannot be submitted")]
    DisallowedVirtualSubmission(OperationKind),

    #[error("proposal nesting depth {depth} exceeds maximum of {max}")]
    NestedStructureTooDeep { depth: usize, max: usize },

    #[error("proposal contains no operations")]
    NestedStructureEmpty,

    #[error("inconsistent authority: {0}")]
    InconsistentAuthorityObject(String),

    #[error("transaction contains no operations")]
    EmptyTransaction,

    #[error("operation {index} ({kind}) is invalid: {source}")]
    InvalidOperation {
        index: usize,
        kind: OperationKind,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::MalformedField {
            field,
            reason: reason.into(),
        }
    }

    /// The innermost error, looking through [`ValidationError::InvalidOperation`].
    pub fn root_cause(&self) -> &ValidationError {
        match self {
            ValidationError::InvalidOperation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
