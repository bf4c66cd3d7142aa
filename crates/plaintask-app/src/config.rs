//! Application configuration loaded from `plaintask.toml` in the data
//! directory. Every field has a default; an absent file is the default
//! configuration, never an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use plaintask_core::SortField;
use serde::Deserialize;

use crate::task_io::LineEnding;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "plaintask.toml";

/// Application configuration: store file names, line endings, and the
/// default sort field ordering.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Active store file name, relative to the data directory.
    #[serde(default = "default_todo_file")]
    pub todo_file: PathBuf,
    /// Archive store file name, relative to the data directory.
    #[serde(default = "default_done_file")]
    pub done_file: PathBuf,
    /// Line terminator used when writing stores.
    #[serde(default)]
    pub line_ending: LineEnding,
    /// Field ordering used when a filter has no sort of its own.
    #[serde(default = "default_sort_fields")]
    pub default_sort: Vec<SortField>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            todo_file: default_todo_file(),
            done_file: default_done_file(),
            line_ending: LineEnding::default(),
            default_sort: default_sort_fields(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `dir`, falling back to defaults when the
    /// file is absent.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.default_sort.is_empty() {
            bail!("default_sort must name at least one field");
        }
        Ok(())
    }

    /// Absolute path of the active store under `dir`.
    #[must_use]
    pub fn todo_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.todo_file)
    }

    /// Absolute path of the archive store under `dir`.
    #[must_use]
    pub fn done_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.done_file)
    }
}

fn default_todo_file() -> PathBuf {
    PathBuf::from("todo.txt")
}

fn default_done_file() -> PathBuf {
    PathBuf::from("done.txt")
}

fn default_sort_fields() -> Vec<SortField> {
    vec![
        SortField::Completed,
        SortField::Priority,
        SortField::Alphabetical,
    ]
}
