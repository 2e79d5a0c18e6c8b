//! Command-line interface for bookstore
//!
//! The CLI is a thin host for the book edit form: it plays the role of the
//! dialog window, feeding field values in, confirming, and committing the
//! result to the local catalog when the form accepts.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{Config, CONFIG_FILE};
use crate::error::Result;
use crate::output::{emit_success, HumanReport, OutputOptions, Warnings};
use crate::session::SessionToken;

mod author;
mod book;

/// bookstore - create and edit books with conflict-checked saves
///
/// Edits are validated and checked against the catalog for changes made by
/// other users since the edit began.
#[derive(Parser, Debug)]
#[command(name = "bookstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding catalog.json (defaults to current directory)
    #[arg(long, global = true, env = "BOOKSTORE_DIR")]
    pub dir: Option<PathBuf>,

    /// Session token presented to the bookstore (defaults to session.token)
    #[arg(long, global = true, env = "BOOKSTORE_TOKEN")]
    pub token: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List authors
    Authors,

    /// Add an author to the catalog
    AddAuthor {
        /// Author name
        name: String,
    },

    /// List books
    Books,

    /// Create a new book
    New {
        /// Book title
        #[arg(long, default_value = "")]
        title: String,

        /// Publication year (four digits)
        #[arg(long, default_value = "")]
        year: String,

        /// Author id
        #[arg(long)]
        author: Option<i64>,
    },

    /// Edit an existing book
    Edit {
        /// Book id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New publication year
        #[arg(long)]
        year: Option<String>,

        /// New author id
        #[arg(long)]
        author: Option<i64>,

        /// Treat the edit as started at this RFC 3339 timestamp instead of
        /// the book's current last-modified time
        #[arg(long)]
        since: Option<DateTime<Utc>>,

        /// On conflict, overwrite the other user's changes
        #[arg(long, conflicts_with = "keep")]
        overwrite: bool,

        /// On conflict, keep the other user's changes and cancel
        #[arg(long)]
        keep: bool,
    },
}

/// Resolved settings shared by every subcommand
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub dir: PathBuf,
    pub config: Config,
    pub token: SessionToken,
    pub output: OutputOptions,
    pub warnings: Warnings,
}

impl Context {
    pub fn warn(&self, message: impl Into<String>) {
        self.warnings.push(message);
    }

    /// Print the command's report along with any warnings raised so far
    pub fn emit<T: Serialize>(&self, command: &str, data: &T, human: HumanReport) -> Result<()> {
        emit_success(self.output, command, data, &human, self.warnings.take())
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let dir = self
            .dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let warnings = Warnings::new(self.json);
        let config = match Config::load_from_dir(&dir) {
            Ok(config) => config,
            Err(err) => {
                warnings.push(format!("ignoring {CONFIG_FILE}, using defaults: {err}"));
                Config::default()
            }
        };
        let token = SessionToken::new(
            self.token
                .clone()
                .unwrap_or_else(|| config.session.token.clone()),
        );
        let ctx = Context {
            dir,
            config,
            token,
            output: OutputOptions {
                json: self.json,
                quiet: self.quiet,
            },
            warnings,
        };

        let result = match self.command {
            Commands::Authors => author::run_list(&ctx),
            Commands::AddAuthor { name } => author::run_add(&ctx, &name),
            Commands::Books => book::run_list(&ctx),
            Commands::New {
                title,
                year,
                author,
            } => book::run_new(
                &ctx,
                book::NewOptions {
                    title,
                    year,
                    author,
                },
            ),
            Commands::Edit {
                id,
                title,
                year,
                author,
                since,
                overwrite,
                keep,
            } => book::run_edit(
                &ctx,
                book::EditOptions {
                    id,
                    title,
                    year,
                    author,
                    since,
                    overwrite,
                    keep,
                },
            ),
        };

        // Error envelopes carry no warnings; keep them visible on stderr.
        if result.is_err() && ctx.output.json {
            for warning in ctx.warnings.take() {
                eprintln!("warning: {warning}");
            }
        }
        result
    }
}
