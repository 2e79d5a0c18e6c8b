//! Report rendering for bookstore CLI commands.
//!
//! Every command ends in exactly one report. With `--json` it is wrapped in a
//! versioned envelope on stdout:
//!
//! ```text
//! { "schema_version": "bookstore.v1", "command": "edit", "status": "success",
//!   "data": { ... }, "warnings": ["..."] }
//! { "schema_version": "bookstore.v1", "command": "edit", "status": "error",
//!   "error": { "message": "...", "code": 3, "kind": "rejected", "hint": "..." } }
//! ```
//!
//! Otherwise a title line with aligned fields and rows is printed. Warnings
//! raised while a command runs go to stderr as they happen in human mode and
//! into the envelope in JSON mode.

use std::cell::RefCell;
use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use crate::error::{exit_codes, Error, Result};

pub const SCHEMA_VERSION: &str = "bookstore.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Human rendering of a command report
#[derive(Debug, Clone)]
pub struct HumanReport {
    title: String,
    fields: Vec<(&'static str, String)>,
    rows: Vec<String>,
}

impl HumanReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn field(mut self, key: &'static str, value: impl Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    pub fn row(mut self, line: impl Into<String>) -> Self {
        self.rows.push(line.into());
        self
    }

    /// Title, then `key  value` lines padded to the longest key, then rows.
    pub fn render(&self) -> String {
        let width = self.fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        let mut out = self.title.clone();
        for (key, value) in &self.fields {
            out.push_str(&format!("\n  {key:<width$}  {value}"));
        }
        for row in &self.rows {
            out.push_str("\n  ");
            out.push_str(row);
        }
        out
    }
}

/// Warnings raised while a command runs
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    json: bool,
    items: RefCell<Vec<String>>,
}

impl Warnings {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            items: RefCell::new(Vec::new()),
        }
    }

    pub fn push(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "warning");
        if !self.json {
            eprintln!("warning: {message}");
        }
        self.items.borrow_mut().push(message);
    }

    pub fn take(&self) -> Vec<String> {
        self.items.take()
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    #[serde(flatten)]
    body: Body<'a, T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Body<'a, T: Serialize> {
    Data(&'a T),
    Error(ErrorBody),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: &HumanReport,
    warnings: Vec<String>,
) -> Result<()> {
    if options.json {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            body: Body::Data(data),
            warnings,
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else if !options.quiet {
        println!("{}", human.render());
    }
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let hint = error_hint(err);
    if !json {
        eprintln!("error: {err}");
        if let Some(hint) = hint {
            eprintln!("hint: {hint}");
        }
        return Ok(());
    }

    let envelope: Envelope<'_, ()> = Envelope {
        schema_version: SCHEMA_VERSION,
        command,
        status: "error",
        body: Body::Error(ErrorBody {
            message: err.to_string(),
            code: err.exit_code(),
            kind: error_kind(err),
            details: err.details(),
            hint,
        }),
        warnings: Vec::new(),
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

/// First non-flag argument, used to label error output before clap has run
pub fn infer_command_name_from_args() -> String {
    std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with('-'))
        .unwrap_or_else(|| "bookstore".to_string())
}

fn error_kind(err: &Error) -> &'static str {
    match err.exit_code() {
        exit_codes::USER_ERROR => "user_error",
        exit_codes::REJECTED => "rejected",
        _ => "operation_failed",
    }
}

fn error_hint(err: &Error) -> Option<String> {
    match err {
        Error::AuthorNotFound(_) => Some("bookstore authors".to_string()),
        Error::BookNotFound(_) => Some("bookstore books".to_string()),
        Error::EditCancelled(id) => Some(format!("bookstore edit {id} --overwrite")),
        Error::StaleCommit(id) => Some(format!("bookstore edit {id}")),
        Error::Unauthorized => Some("check --token or session.token in .bookstore.toml".to_string()),
        Error::InvalidConfig(_) => Some("fix .bookstore.toml then retry".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookId;

    #[test]
    fn fields_align_to_longest_key() {
        let human = HumanReport::new("bookstore edit: Dune")
            .field("id", 1)
            .field("last_modified", "2024-05-01T12:00:00+00:00");
        assert_eq!(
            human.render(),
            "bookstore edit: Dune\n  id             1\n  last_modified  2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn title_only_report() {
        assert_eq!(HumanReport::new("bookstore books: 0").render(), "bookstore books: 0");
    }

    #[test]
    fn warnings_are_drained_once() {
        let warnings = Warnings::new(true);
        warnings.push("first");
        assert_eq!(warnings.take(), vec!["first".to_string()]);
        assert!(warnings.take().is_empty());
    }

    #[test]
    fn error_kinds_follow_exit_codes() {
        assert_eq!(error_kind(&Error::Unauthorized), "rejected");
        assert_eq!(error_kind(&Error::StaleCommit(BookId(2))), "rejected");
        assert_eq!(error_kind(&Error::BookNotFound(BookId(1))), "user_error");
        assert_eq!(error_kind(&Error::Service("down".into())), "operation_failed");
    }

    #[test]
    fn success_envelope_shape() {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            command: "books",
            status: "success",
            body: Body::Data(&serde_json::json!({ "books": [] })),
            warnings: vec!["edit started from 2000-01-01T00:00:00+00:00".to_string()],
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["data"]["books"], serde_json::json!([]));
        assert_eq!(value["warnings"][0], "edit started from 2000-01-01T00:00:00+00:00");
        assert!(value.get("error").is_none());
    }
}
