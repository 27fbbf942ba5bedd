//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the taxonomy tree's rules.
/// The tree is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("the tree already has Class '{existing}'; cannot add a path under Class '{requested}'")]
    Conflict { existing: String, requested: String },

    #[error("invalid target: {0}")]
    InvalidTarget(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
