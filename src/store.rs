//! File-backed bookstore.
//!
//! Keeps authors and books in a single `catalog.json` inside a data
//! directory and implements [`BookstoreService`] against it, so the edit
//! form can run end to end without a remote server.
//!
//! ```text
//! <dir>/
//!   catalog.json        # { "authors": [...], "books": [...] }
//!   catalog.json.lock   # held while a write is in progress
//!   .bookstore.toml     # optional configuration
//! ```

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::form::BookSubmission;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::model::{Author, AuthorId, Book, BookId};
use crate::session::{BookstoreService, SessionToken};

pub const CATALOG_FILE: &str = "catalog.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl Catalog {
    fn next_author_id(&self) -> AuthorId {
        AuthorId(self.authors.iter().map(|a| a.id.0).max().unwrap_or(0) + 1)
    }

    fn next_book_id(&self) -> BookId {
        BookId(self.books.iter().map(|b| b.id.0).max().unwrap_or(0) + 1)
    }
}

#[derive(Debug, Clone)]
pub struct JsonBookstore {
    dir: PathBuf,
    token: SessionToken,
}

impl JsonBookstore {
    /// Open the store in `dir`. Only `token` is accepted from clients.
    /// Nothing is created until the first write.
    pub fn open(dir: impl Into<PathBuf>, token: SessionToken) -> Self {
        Self {
            dir: dir.into(),
            token,
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.dir.join(CATALOG_FILE)
    }

    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        if !path.exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn authors(&self) -> Result<Vec<Author>> {
        Ok(self.catalog()?.authors)
    }

    pub fn books(&self) -> Result<Vec<Book>> {
        Ok(self.catalog()?.books)
    }

    pub fn book(&self, id: BookId) -> Result<Book> {
        self.catalog()?
            .books
            .into_iter()
            .find(|book| book.id == id)
            .ok_or(Error::BookNotFound(id))
    }

    pub fn add_author(&self, name: &str) -> Result<Author> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "author name cannot be empty".to_string(),
            ));
        }

        self.update(|catalog| {
            let author = Author::new(catalog.next_author_id(), name);
            catalog.authors.push(author.clone());
            info!(author = %author.id, "author added");
            Ok(author)
        })
    }

    /// Persist a confirmed form. New books get the next free id; existing
    /// books are overwritten. Either way `last_modified` becomes now.
    ///
    /// An update carrying `expected_last_modified` is refused with
    /// `StaleCommit` if the stored book changed since the conflict check.
    pub fn commit(&self, submission: &BookSubmission, token: &SessionToken) -> Result<Book> {
        self.authorize(token)?;

        self.update(|catalog| {
            if !catalog.authors.iter().any(|a| a.id == submission.author_id) {
                return Err(Error::AuthorNotFound(submission.author_id));
            }

            let now = Utc::now();
            let book = match submission.book_id {
                None => {
                    let book = Book {
                        id: catalog.next_book_id(),
                        title: submission.title.clone(),
                        author_id: submission.author_id,
                        publish_year: submission.publish_year,
                        last_modified: now,
                    };
                    catalog.books.push(book.clone());
                    book
                }
                Some(id) => {
                    let existing = catalog
                        .books
                        .iter_mut()
                        .find(|book| book.id == id)
                        .ok_or(Error::BookNotFound(id))?;
                    if let Some(expected) = submission.expected_last_modified {
                        if existing.last_modified != expected {
                            return Err(Error::StaleCommit(id));
                        }
                    }
                    existing.title = submission.title.clone();
                    existing.author_id = submission.author_id;
                    existing.publish_year = submission.publish_year;
                    existing.last_modified = now;
                    existing.clone()
                }
            };

            info!(book = %book.id, "book committed");
            Ok(book)
        })
    }

    fn authorize(&self, token: &SessionToken) -> Result<()> {
        if *token != self.token {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    /// Locked read-modify-write of the catalog
    fn update<T>(&self, apply: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
        let path = self.catalog_path();
        let _lock = FileLock::acquire(lock::lock_path_for(&path), DEFAULT_LOCK_TIMEOUT_MS)?;

        let mut catalog = self.catalog()?;
        let value = apply(&mut catalog)?;
        let json = serde_json::to_string_pretty(&catalog)?;
        lock::write_atomic(&path, json.as_bytes())?;
        debug!(path = %path.display(), "catalog written");
        Ok(value)
    }
}

impl BookstoreService for JsonBookstore {
    fn was_edited(
        &self,
        book_id: BookId,
        last_modified: DateTime<Utc>,
        token: &SessionToken,
    ) -> Result<bool> {
        self.authorize(token)?;
        let stored = self.book(book_id)?;
        Ok(stored.last_modified != last_modified)
    }
}
