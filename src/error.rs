//! Error types for bookstore
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, invalid form input, unknown ids)
//! - 3: Rejected (unauthorized session, edit cancelled on conflict)
//! - 4: Operation failed (I/O, serialization, service failure)

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{AuthorId, BookId};
use crate::validation::ValidationError;

/// Exit codes for the bookstore CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const REJECTED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for bookstore operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Author not found: {0}")]
    AuthorNotFound(AuthorId),

    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    #[error("Form is already closed")]
    FormClosed,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    // Rejections (exit code 3)
    #[error("Session token rejected by the bookstore service")]
    Unauthorized,

    #[error("Edit of book {0} cancelled: it was modified by another user")]
    EditCancelled(BookId),

    #[error("Book {0} changed while saving; nothing was written")]
    StaleCommit(BookId),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Bookstore service failed: {0}")]
    Service(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::AuthorNotFound(_)
            | Error::BookNotFound(_)
            | Error::FormClosed
            | Error::Validation(_) => exit_codes::USER_ERROR,

            // Rejections
            Error::Unauthorized | Error::EditCancelled(_) | Error::StaleCommit(_) => {
                exit_codes::REJECTED
            }

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::Service(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured fields for JSON error output, when the variant carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::AuthorNotFound(id) => Some(serde_json::json!({ "author_id": id })),
            Error::BookNotFound(id) | Error::EditCancelled(id) | Error::StaleCommit(id) => {
                Some(serde_json::json!({ "book_id": id }))
            }
            Error::Validation(err) => Some(serde_json::json!({ "field": err.field() })),
            Error::LockFailed(path) => {
                Some(serde_json::json!({ "path": path.to_string_lossy() }))
            }
            _ => None,
        }
    }
}

/// Result type alias for bookstore operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_display_form_message() {
        let err = Error::from(ValidationError::InvalidYear);
        assert_eq!(err.to_string(), "Publication year must be a valid year.");
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn cancelled_edit_is_rejected() {
        let err = Error::EditCancelled(BookId(7));
        assert_eq!(err.exit_code(), exit_codes::REJECTED);
        let details = err.details().expect("details");
        assert_eq!(details["book_id"], serde_json::json!(7));
    }
}
