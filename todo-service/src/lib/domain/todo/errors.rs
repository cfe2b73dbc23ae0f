use std::fmt;

use thiserror::Error;

use crate::domain::todo::models::TodoId;

/// Error type for TodoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for title and description validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoTextError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Error type for pagination parameters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Limit must be between {min} and {max}, got {actual}")]
    LimitOutOfRange { min: u32, max: u32, actual: i64 },

    #[error("Offset must be between 0 and {max}, got {actual}")]
    OffsetOutOfRange { max: u32, actual: i64 },
}

/// State rule a patch can break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationRule {
    /// Title and description are frozen while the todo is done.
    DoneIsFrozen,
}

impl fmt::Display for MutationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationRule::DoneIsFrozen => f.write_str("Done items can only be unchecked or deleted"),
        }
    }
}

/// Top-level error type for all todo-related operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    #[error("Invalid todo: {0}")]
    InvalidText(#[from] TodoTextError),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(#[from] PaginationError),

    #[error("{0}")]
    InvalidMutation(MutationRule),

    #[error("Todo not found: {0}")]
    NotFound(TodoId),

    #[error("Todo {0} belongs to another account")]
    Forbidden(TodoId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
