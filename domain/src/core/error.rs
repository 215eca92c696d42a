//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("user_query must not be empty")]
    EmptyQuery,

    #[error("Invalid role: {0}")]
    InvalidRole(String),
}

impl DomainError {
    /// Check if this error was caused by the caller's input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DomainError::EmptyQuery)
    }
}
