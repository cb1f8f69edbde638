//! Error taxonomy for the todo service
//!
//! Every public operation reports failures through [`TodoError`] so callers
//! can tell "not found" apart from "no matches" and from store failures.

use thiserror::Error;

/// Errors produced by todo operations
#[derive(Debug, Error)]
pub enum TodoError {
    /// Input failed validation; carries every violated constraint
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The referenced todo does not exist
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// The record store failed
    #[error("Store error: {0}")]
    Store(String),
}

impl TodoError {
    /// Shorthand for a validation error with a single violation
    pub fn invalid(message: impl Into<String>) -> Self {
        TodoError::Validation(vec![message.into()])
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::Validation(_) => 400,
            TodoError::NotFound(_) => 404,
            TodoError::Store(_) => 500,
        }
    }
}

impl From<std::io::Error> for TodoError {
    fn from(e: std::io::Error) -> Self {
        TodoError::Store(e.to_string())
    }
}

impl From<toml::ser::Error> for TodoError {
    fn from(e: toml::ser::Error) -> Self {
        TodoError::Store(e.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, TodoError>;
