//! List store error types

use std::fmt;
use thiserror::Error;

/// What an operation was acting on when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    List,
    Todo,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::List => f.write_str("list"),
            Subject::Todo => f.write_str("todo"),
        }
    }
}

/// Recoverable failures of list/todo operations.
///
/// The `Display` text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("The {0} name must be between 1 and 100 characters.")]
    InvalidLength(Subject),

    #[error("The {0} name must be unique.")]
    DuplicateName(Subject),

    #[error("The specified {0} was not found.")]
    NotFound(Subject),
}

impl StoreError {
    /// True for the two name validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidLength(_) | StoreError::DuplicateName(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
