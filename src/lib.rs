//! bookstore-client - book edit form view-model
//!
//! This library provides the view-model behind a "new/edit book" dialog,
//! together with a file-backed bookstore and a CLI host that drives it.
//!
//! # Core Concepts
//!
//! - **Edit form**: editable fields, validation, and a single-shot confirm
//! - **Conflict check**: optimistic-concurrency comparison of the book's
//!   last-modified timestamp against the one loaded when editing began
//! - **Session**: explicit service handle + auth token passed to confirm
//! - **Prompt**: yes/no decision when another user changed the book
//!
//! # Module Organization
//!
//! - `cli`: Command-line host using clap
//! - `config`: Configuration loading from `.bookstore.toml`
//! - `error`: Error types and result aliases
//! - `form`: The `BookEditForm` view-model
//! - `lock`: File locking and atomic writes
//! - `model`: Authors and books
//! - `observable`: Field change notification
//! - `output`: Human and JSON output for the CLI
//! - `prompt`: Confirmation prompts
//! - `session`: Session context and the bookstore service seam
//! - `store`: JSON-file bookstore
//! - `validation`: Field rules and validation errors

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod lock;
pub mod model;
pub mod observable;
pub mod output;
pub mod prompt;
pub mod session;
pub mod store;
pub mod validation;
