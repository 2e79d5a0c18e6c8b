//! bookstore book commands (books, new, edit)
//!
//! `new` and `edit` drive a [`BookEditForm`] the way a dialog would: set the
//! fields, confirm, and commit to the catalog only when the form accepts.

use std::io;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::form::{BookEditForm, ConfirmOutcome, DialogOutcome};
use crate::model::{Author, AuthorId, Book, BookId};
use crate::output::HumanReport;
use crate::prompt::{ConfirmPrompt, FixedPrompt, LinePrompt, PromptAnswer};
use crate::session::Session;
use crate::store::JsonBookstore;

use super::author::open_store;
use super::Context;

/// Options for `bookstore new`
pub struct NewOptions {
    pub title: String,
    pub year: String,
    pub author: Option<i64>,
}

/// Options for `bookstore edit`
pub struct EditOptions {
    pub id: i64,
    pub title: Option<String>,
    pub year: Option<String>,
    pub author: Option<i64>,
    pub since: Option<DateTime<Utc>>,
    pub overwrite: bool,
    pub keep: bool,
}

#[derive(serde::Serialize)]
struct BookListReport {
    books: Vec<Book>,
}

#[derive(serde::Serialize)]
struct BookSavedReport {
    outcome: DialogOutcome,
    book: Book,
}

pub fn run_list(ctx: &Context) -> Result<()> {
    let store = open_store(ctx);
    let books = store.books()?;

    let human = books.iter().fold(
        HumanReport::new(format!("bookstore books: {}", books.len())),
        |human, book| {
            human.row(format!(
                "{:>4}  {} ({}) by {}, modified {}",
                book.id.0,
                book.title,
                book.publish_year,
                book.author_id,
                book.last_modified.to_rfc3339()
            ))
        },
    );

    ctx.emit("books", &BookListReport { books }, human)
}

pub fn run_new(ctx: &Context, options: NewOptions) -> Result<()> {
    let store = open_store(ctx);
    let authors = store.authors()?;
    let author = require_author(&authors, options.author)?;

    let mut form = BookEditForm::with_authors(authors);
    form.set_name(options.title);
    form.set_publication_year(options.year);
    form.select_author(author);

    // Create mode never reaches the conflict prompt.
    let mut prompt = FixedPrompt::new(PromptAnswer::No);
    let book = submit(ctx, &store, &mut form, &mut prompt)?;
    report(ctx, "new", book)
}

pub fn run_edit(ctx: &Context, options: EditOptions) -> Result<()> {
    let store = open_store(ctx);
    let authors = store.authors()?;
    let author = require_author(&authors, options.author)?;

    let mut loaded = store.book(BookId(options.id))?;
    if let Some(since) = options.since {
        debug!(book = options.id, %since, "edit started from an earlier snapshot");
        ctx.warn(format!(
            "treating edit of book {} as started at {}, not its last change at {}",
            loaded.id,
            since.to_rfc3339(),
            loaded.last_modified.to_rfc3339()
        ));
        loaded.last_modified = since;
    }
    if author.is_none() && !authors.iter().any(|a| a.id == loaded.author_id) {
        ctx.warn(format!(
            "book {} refers to author {} which is not in the catalog; pass --author",
            loaded.id, loaded.author_id
        ));
    }

    let mut form = BookEditForm::for_book(authors, Some(&loaded));
    if let Some(title) = options.title {
        form.set_name(title);
    }
    if let Some(year) = options.year {
        form.set_publication_year(year);
    }
    if author.is_some() {
        form.select_author(author);
    }

    let preset = if options.overwrite {
        Some(PromptAnswer::Yes)
    } else if options.keep {
        Some(PromptAnswer::No)
    } else {
        ctx.config.conflict.on_conflict.preset_answer()
    };

    let book = match preset {
        Some(answer) => submit(ctx, &store, &mut form, &mut FixedPrompt::new(answer))?,
        None => {
            let mut prompt = LinePrompt::new(io::stdin().lock(), io::stderr());
            submit(ctx, &store, &mut form, &mut prompt)?
        }
    };
    report(ctx, "edit", book)
}

/// Resolve `--author` against the catalog
fn require_author(authors: &[Author], id: Option<i64>) -> Result<Option<AuthorId>> {
    match id.map(AuthorId) {
        Some(id) if !authors.iter().any(|a| a.id == id) => Err(Error::AuthorNotFound(id)),
        other => Ok(other),
    }
}

/// Confirm the form and commit on accept
fn submit(
    ctx: &Context,
    store: &JsonBookstore,
    form: &mut BookEditForm,
    prompt: &mut dyn ConfirmPrompt,
) -> Result<Book> {
    let session = Session::new(store, ctx.token.clone());

    match form.confirm(&session, prompt)? {
        ConfirmOutcome::StayOpen(err) => Err(err.into()),
        ConfirmOutcome::Closed(DialogOutcome::Cancel) => {
            let id = form.book_id().unwrap_or(BookId(0));
            Err(Error::EditCancelled(id))
        }
        ConfirmOutcome::Closed(DialogOutcome::Accept) => {
            let submission = form.submission()?;
            store.commit(&submission, session.token())
        }
    }
}

fn report(ctx: &Context, command: &str, book: Book) -> Result<()> {
    let human = HumanReport::new(format!("bookstore {command}: {}", book.title))
        .field("id", book.id)
        .field("author", book.author_id)
        .field("year", book.publish_year)
        .field("last_modified", book.last_modified.to_rfc3339());

    ctx.emit(
        command,
        &BookSavedReport {
            outcome: DialogOutcome::Accept,
            book,
        },
        human,
    )
}
