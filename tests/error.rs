use std::path::PathBuf;

use bookstore_client::error::{exit_codes, Error};
use bookstore_client::model::{AuthorId, BookId};
use bookstore_client::validation::ValidationError;
use serde_json::Value;

#[test]
fn exit_code_user_error() {
    let err = Error::InvalidArgument("bad input".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    assert_eq!(Error::FormClosed.exit_code(), exit_codes::USER_ERROR);
    assert_eq!(
        Error::from(ValidationError::EmptyName).exit_code(),
        exit_codes::USER_ERROR
    );
}

#[test]
fn exit_code_rejected() {
    assert_eq!(Error::Unauthorized.exit_code(), exit_codes::REJECTED);
    assert_eq!(
        Error::EditCancelled(BookId(1)).exit_code(),
        exit_codes::REJECTED
    );
    assert_eq!(Error::StaleCommit(BookId(1)).exit_code(), exit_codes::REJECTED);
}

#[test]
fn exit_code_operation_failed() {
    let err = Error::Service("timeout".to_string());
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    let err = Error::LockFailed(PathBuf::from("catalog.json.lock"));
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn details_include_ids() {
    let details = Error::AuthorNotFound(AuthorId(3)).details().expect("details");
    assert_eq!(details["author_id"], Value::from(3));
    let details = Error::StaleCommit(BookId(4)).details().expect("details");
    assert_eq!(details["book_id"], Value::from(4));
    assert!(Error::Unauthorized.details().is_none());
}

#[test]
fn messages_name_the_book() {
    assert_eq!(Error::BookNotFound(BookId(9)).to_string(), "Book not found: 9");
    assert_eq!(
        Error::StaleCommit(BookId(9)).to_string(),
        "Book 9 changed while saving; nothing was written"
    );
}
