//! Configuration loading and management
//!
//! Handles parsing of `.bookstore.toml` in the data directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prompt::PromptAnswer;

pub const CONFIG_FILE: &str = ".bookstore.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Conflict handling configuration
    #[serde(default)]
    pub conflict: ConflictConfig,
}

/// Session-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token presented to the bookstore service
    #[serde(default = "default_token")]
    pub token: String,
}

fn default_token() -> String {
    "local".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token: default_token(),
        }
    }
}

/// What to do when a book changed underneath an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Ask interactively
    Ask,
    /// Overwrite the other user's changes
    Overwrite,
    /// Keep the other user's changes and cancel the edit
    Keep,
}

impl ConflictPolicy {
    /// The answer implied by the policy, or `None` when the user must be asked
    pub fn preset_answer(self) -> Option<PromptAnswer> {
        match self {
            ConflictPolicy::Ask => None,
            ConflictPolicy::Overwrite => Some(PromptAnswer::Yes),
            ConflictPolicy::Keep => Some(PromptAnswer::No),
        }
    }
}

/// Conflict-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictConfig {
    #[serde(default = "default_on_conflict")]
    pub on_conflict: ConflictPolicy,
}

fn default_on_conflict() -> ConflictPolicy {
    ConflictPolicy::Ask
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            on_conflict: default_on_conflict(),
        }
    }
}

impl Config {
    /// Load configuration from a `.bookstore.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory. A missing file yields
    /// defaults; an unreadable or invalid one is an error.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load(&config_path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.session.token.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "session.token cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
