use thiserror::Error;

use crate::domain::reference::reference_type::ReferenceType;

/// Failures of the reference layer. None of them is fatal.
#[derive(Debug, Clone, Error)]
pub enum ReferenceError {
    #[error("failed to load {reference_type} references: {message}")]
    Fetch {
        reference_type: ReferenceType,
        message: String,
    },

    #[error("unknown reference type: {0}")]
    UnknownType(String),

    #[error("no store registered for {0}")]
    NotRegistered(ReferenceType),
}
