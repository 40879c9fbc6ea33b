//! Error taxonomy
//!
//! Every fallible core operation returns one of these variants. All of them
//! are recoverable: callers surface the message and carry on, and a failed
//! operation never leaves a collection partially mutated.

use thiserror::Error;

use crate::types::RecordId;

/// Errors raised by the calculators, the statistics engine, and the ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FarmError {
    /// A user-supplied value failed validation (non-numeric, non-positive,
    /// or a required field is missing).
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    /// Descriptive statistics were requested on zero observations.
    #[error("cannot compute statistics on an empty sample")]
    EmptySample,

    /// A CRUD operation referenced a record id that does not exist.
    #[error("no {kind} record with id {id}")]
    NotFound { kind: &'static str, id: RecordId },

    /// The static dosage catalog is missing an entry or carries an unusable
    /// one. This is a data-integrity defect, not a user mistake, and it is
    /// never papered over with a default value.
    #[error("catalog misconfigured: {detail}")]
    Configuration { detail: String },
}

impl FarmError {
    /// Shorthand for validation failures.
    pub fn invalid(field: &'static str, reason: &'static str) -> Self {
        FarmError::InvalidInput { field, reason }
    }

    /// Shorthand for catalog problems.
    pub fn configuration(detail: impl Into<String>) -> Self {
        FarmError::Configuration {
            detail: detail.into(),
        }
    }
}
