//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of an operation's preconditions.
/// Sorting is total, so only traversals can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("tree is empty")]
    EmptyTree,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
