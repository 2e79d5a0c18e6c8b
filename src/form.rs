//! Book edit form view-model.
//!
//! Holds the editable state for one create/edit dialog, validates it, and on
//! confirm resolves optimistic-concurrency conflicts with the user before
//! reporting a [`DialogOutcome`] to the hosting dialog.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{Author, AuthorId, Book, BookId};
use crate::observable::{ChangeListener, ChangeNotifier, FormField, SubscriptionId};
use crate::prompt::{ConfirmPrompt, PromptAnswer, CONFLICT_MESSAGE, CONFLICT_TITLE};
use crate::session::Session;
use crate::validation::{is_valid_publication_year, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// How the dialog closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogOutcome {
    /// Close and commit
    Accept,
    /// Close without committing
    Cancel,
}

impl DialogOutcome {
    pub fn accepted(self) -> bool {
        matches!(self, DialogOutcome::Accept)
    }
}

/// Result of a single confirm attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Validation failed; the dialog stays open showing the error message
    StayOpen(ValidationError),
    Closed(DialogOutcome),
}

/// The persisted book being edited. Id and timestamp always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EditTarget {
    book_id: BookId,
    last_modified: DateTime<Utc>,
}

/// Validated, typed form values ready for the host to commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSubmission {
    pub book_id: Option<BookId>,
    pub title: String,
    pub author_id: AuthorId,
    pub publish_year: i32,
    /// Timestamp the stored book must still carry when this is written.
    /// `None` for new books and after the user chose to overwrite.
    pub expected_last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct BookEditForm {
    name: String,
    publication_year: String,
    error_message: String,
    author_choices: Vec<Author>,
    selected_author: Option<AuthorId>,
    target: Option<EditTarget>,
    outcome: Option<DialogOutcome>,
    overwrite_confirmed: bool,
    notifier: ChangeNotifier,
}

impl Default for BookEditForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BookEditForm {
    /// Empty form for a new book with no author choices
    pub fn new() -> Self {
        Self::with_authors(Vec::new())
    }

    /// Empty form for a new book
    pub fn with_authors(authors: Vec<Author>) -> Self {
        Self {
            name: String::new(),
            publication_year: String::new(),
            error_message: String::new(),
            author_choices: authors,
            selected_author: None,
            target: None,
            outcome: None,
            overwrite_confirmed: false,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Form pre-filled from an existing book.
    ///
    /// The selected author is the first entry of `authors` whose id matches
    /// `book.author_id`; if there is none the form starts with no selection.
    /// With `book` absent the form is left fully default, without the author
    /// list.
    pub fn for_book(authors: Vec<Author>, book: Option<&Book>) -> Self {
        let Some(book) = book else {
            return Self::new();
        };

        let selected_author = authors
            .iter()
            .find(|author| author.id == book.author_id)
            .map(|author| author.id);
        if selected_author.is_none() {
            debug!(book = %book.id, author = %book.author_id, "book author not among choices");
        }

        Self {
            name: book.title.clone(),
            publication_year: book.publish_year.to_string(),
            error_message: String::new(),
            author_choices: authors,
            selected_author,
            target: Some(EditTarget {
                book_id: book.id,
                last_modified: book.last_modified,
            }),
            outcome: None,
            overwrite_confirmed: false,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.target.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn book_id(&self) -> Option<BookId> {
        self.target.map(|target| target.book_id)
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.target.map(|target| target.last_modified)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn publication_year(&self) -> &str {
        &self.publication_year
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn author_choices(&self) -> &[Author] {
        &self.author_choices
    }

    pub fn selected_author(&self) -> Option<&Author> {
        let id = self.selected_author?;
        self.author_choices.iter().find(|author| author.id == id)
    }

    /// Terminal outcome, once confirm has closed the form
    pub fn outcome(&self) -> Option<DialogOutcome> {
        self.outcome
    }

    pub fn is_closed(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn subscribe(&mut self, listener: ChangeListener) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.notifier.publish(FormField::Name);
    }

    pub fn set_publication_year(&mut self, value: impl Into<String>) {
        self.publication_year = value.into();
        self.notifier.publish(FormField::PublicationYear);
    }

    /// Replace the author list. A selection that no longer resolves is dropped.
    pub fn set_author_choices(&mut self, authors: Vec<Author>) {
        self.author_choices = authors;
        self.notifier.publish(FormField::AuthorChoices);
        if let Some(id) = self.selected_author {
            if !self.author_choices.iter().any(|author| author.id == id) {
                self.selected_author = None;
                self.notifier.publish(FormField::SelectedAuthor);
            }
        }
    }

    /// Select an author by id. Ids not in the author list clear the selection.
    pub fn select_author(&mut self, id: Option<AuthorId>) {
        self.selected_author =
            id.filter(|id| self.author_choices.iter().any(|author| author.id == *id));
        self.notifier.publish(FormField::SelectedAuthor);
    }

    /// Check the fields in order: name, author, publication year.
    ///
    /// Sets the error message to the first failure, or clears it on success.
    pub fn validate(&mut self) -> std::result::Result<(), ValidationError> {
        let result = self.check_fields();
        match result {
            Ok(()) => self.set_error_message(String::new()),
            Err(err) => self.set_error_message(err.to_string()),
        }
        result
    }

    /// Validate, then run the conflict check for existing books.
    ///
    /// Returns `StayOpen` with the first failure when validation fails. In
    /// edit mode the service is asked whether the book changed since it was
    /// loaded; if so the prompt decides between overwriting (`Accept`) and
    /// backing off (`Cancel`). A service failure is returned as an error with
    /// the form left open.
    pub fn confirm(
        &mut self,
        session: &Session<'_>,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<ConfirmOutcome> {
        if self.is_closed() {
            return Err(Error::FormClosed);
        }

        if let Err(err) = self.validate() {
            debug!(field = err.field(), "book form validation failed");
            return Ok(ConfirmOutcome::StayOpen(err));
        }

        let outcome = match self.target {
            None => DialogOutcome::Accept,
            Some(target) => self.resolve_conflict(target, session, prompt)?,
        };

        info!(?outcome, mode = ?self.mode(), "book form closed");
        self.outcome = Some(outcome);
        Ok(ConfirmOutcome::Closed(outcome))
    }

    /// Validated values for the host to commit
    pub fn submission(&mut self) -> std::result::Result<BookSubmission, ValidationError> {
        self.validate()?;
        let author_id = self.selected_author.ok_or(ValidationError::NoAuthorSelected)?;
        let publish_year = self
            .publication_year
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidYear)?;

        Ok(BookSubmission {
            book_id: self.book_id(),
            title: self.name.clone(),
            author_id,
            publish_year,
            expected_last_modified: if self.overwrite_confirmed {
                None
            } else {
                self.last_modified()
            },
        })
    }

    fn resolve_conflict(
        &mut self,
        target: EditTarget,
        session: &Session<'_>,
        prompt: &mut dyn ConfirmPrompt,
    ) -> Result<DialogOutcome> {
        let edited = match session.service().was_edited(
            target.book_id,
            target.last_modified,
            session.token(),
        ) {
            Ok(edited) => edited,
            Err(err) => {
                warn!(book = %target.book_id, error = %err, "conflict check failed");
                self.set_error_message(format!("Could not check for conflicting changes: {err}"));
                return Err(err);
            }
        };

        if !edited {
            return Ok(DialogOutcome::Accept);
        }

        info!(book = %target.book_id, "book modified by another user since loading");
        let outcome = match prompt.ask(CONFLICT_TITLE, CONFLICT_MESSAGE)? {
            PromptAnswer::Yes => {
                self.overwrite_confirmed = true;
                DialogOutcome::Accept
            }
            PromptAnswer::No => DialogOutcome::Cancel,
        };
        Ok(outcome)
    }

    fn check_fields(&self) -> std::result::Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.selected_author.is_none() {
            return Err(ValidationError::NoAuthorSelected);
        }
        if !is_valid_publication_year(&self.publication_year) {
            return Err(ValidationError::InvalidYear);
        }
        Ok(())
    }

    fn set_error_message(&mut self, message: String) {
        self.error_message = message;
        self.notifier.publish(FormField::ErrorMessage);
    }
}
