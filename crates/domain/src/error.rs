//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A persisted snapshot violates the schema invariants.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
