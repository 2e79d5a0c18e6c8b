//! Session context passed to the form when it confirms.
//!
//! The session bundles the bookstore service handle with the caller's auth
//! token so the form never reaches for process-wide state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::BookId;

/// Opaque token presented to the bookstore service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Remote operations the form depends on
pub trait BookstoreService {
    /// Whether the book changed since `last_modified`, the timestamp loaded
    /// when editing began.
    fn was_edited(
        &self,
        book_id: BookId,
        last_modified: DateTime<Utc>,
        token: &SessionToken,
    ) -> Result<bool>;
}

/// Active session: a service handle plus the token to present to it
pub struct Session<'a> {
    service: &'a dyn BookstoreService,
    token: SessionToken,
}

impl<'a> Session<'a> {
    pub fn new(service: &'a dyn BookstoreService, token: SessionToken) -> Self {
        Self { service, token }
    }

    pub fn service(&self) -> &dyn BookstoreService {
        self.service
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}
