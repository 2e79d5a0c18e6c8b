#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use bookstore_client::form::BookSubmission;
use bookstore_client::model::{Author, Book};
use bookstore_client::session::SessionToken;
use bookstore_client::store::JsonBookstore;
use tempfile::TempDir;

pub const TOKEN: &str = "local";

/// Temporary data directory with a catalog
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store(&self) -> JsonBookstore {
        JsonBookstore::open(self.dir.path(), SessionToken::new(TOKEN))
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(".bookstore.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn add_author(&self, name: &str) -> Author {
        self.store().add_author(name).expect("add author")
    }

    pub fn add_book(&self, author: &Author, title: &str, year: i32) -> Book {
        let submission = BookSubmission {
            book_id: None,
            title: title.to_string(),
            author_id: author.id,
            publish_year: year,
            expected_last_modified: None,
        };
        self.store()
            .commit(&submission, &SessionToken::new(TOKEN))
            .expect("commit book")
    }

    /// `bookstore` pointed at this directory with a clean environment
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bookstore").expect("binary");
        cmd.env_remove("BOOKSTORE_DIR")
            .env_remove("BOOKSTORE_TOKEN")
            .env_remove("RUST_LOG")
            .arg("--dir")
            .arg(self.dir.path());
        cmd
    }
}
