//! Repository over the two flat-file stores: the active list and the
//! archive of completed tasks.

use std::fs;
use std::path::{Path, PathBuf};

use plaintask_core::Task;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::task_io::{self, IoError, LineEnding};

/// Failure during the two-store archive operation, naming the store whose
/// write failed.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Appending the completed partition to the archive store failed; the
    /// active store was not touched.
    #[error("failed to append completed tasks to the archive store")]
    Archive {
        /// Underlying store failure.
        #[source]
        source: IoError,
    },
    /// Rewriting the active store with the incomplete partition failed; the
    /// completed partition was already appended to the archive store.
    #[error("failed to rewrite the active store")]
    Active {
        /// Underlying store failure.
        #[source]
        source: IoError,
    },
}

/// Repository owning the active store path and the archive store path.
///
/// All operations are synchronous whole-file reads and rewrites; callers
/// that allow concurrent mutation must serialize access themselves.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    todo_file: PathBuf,
    done_file: PathBuf,
    line_ending: LineEnding,
}

impl TaskRepository {
    /// Create a repository over the given store paths.
    #[must_use]
    pub fn new(
        todo_file: impl Into<PathBuf>,
        done_file: impl Into<PathBuf>,
        line_ending: LineEnding,
    ) -> Self {
        Self {
            todo_file: todo_file.into(),
            done_file: done_file.into(),
            line_ending,
        }
    }

    /// Path of the active store.
    #[must_use]
    pub fn todo_file(&self) -> &Path {
        &self.todo_file
    }

    /// Path of the archive store.
    #[must_use]
    pub fn done_file(&self) -> &Path {
        &self.done_file
    }

    /// Load the full ordered task list from the active store.
    ///
    /// # Errors
    /// [`IoError::Missing`] when the active store does not exist, a
    /// reportable condition callers may treat as "start with an empty
    /// list"; other variants are genuine read failures.
    pub fn load(&self) -> Result<Vec<Task>, IoError> {
        let tasks = task_io::load(&self.todo_file)?;
        debug!(count = tasks.len(), path = %self.todo_file.display(), "Loaded active store");
        Ok(tasks)
    }

    /// Overwrite the active store with the full, unfiltered task list in
    /// caller order.
    ///
    /// # Errors
    /// Propagates the store write failure.
    pub fn store(&self, tasks: &[Task]) -> Result<(), IoError> {
        task_io::write(tasks, &self.todo_file, self.line_ending, false)?;
        debug!(count = tasks.len(), path = %self.todo_file.display(), "Rewrote active store");
        Ok(())
    }

    /// Move completed tasks to the archive store.
    ///
    /// Partitions the input by completion flag (order preserved within each
    /// partition), appends the completed partition to the archive store,
    /// then rewrites the active store with the incomplete partition.
    /// Returns the number of archived tasks.
    ///
    /// # Errors
    /// [`ArchiveError`] names which of the two writes failed; a failed
    /// archive append leaves the active store untouched.
    pub fn archive(&self, tasks: &[Task]) -> Result<usize, ArchiveError> {
        let (completed, incomplete): (Vec<Task>, Vec<Task>) =
            tasks.iter().cloned().partition(Task::is_completed);

        task_io::write(&completed, &self.done_file, self.line_ending, true)
            .map_err(|source| ArchiveError::Archive { source })?;
        task_io::write(&incomplete, &self.todo_file, self.line_ending, false)
            .map_err(|source| ArchiveError::Active { source })?;

        info!(
            archived = completed.len(),
            remaining = incomplete.len(),
            "Archived completed tasks"
        );
        Ok(completed.len())
    }

    /// Create parent directories and an empty active store when absent.
    ///
    /// Kept separate from construction so [`load`](Self::load) can still
    /// report a missing store.
    ///
    /// # Errors
    /// Propagates the directory or store creation failure.
    pub fn create_if_missing(&self) -> Result<(), IoError> {
        if self.todo_file.exists() {
            return Ok(());
        }
        if let Some(parent) = self.todo_file.parent() {
            fs::create_dir_all(parent).map_err(|source| IoError::Write {
                path: self.todo_file.clone(),
                source,
            })?;
        }
        task_io::write(&[], &self.todo_file, self.line_ending, false)
    }

    /// Delete the active store. Missing stores are not an error.
    ///
    /// # Errors
    /// Propagates any other deletion failure.
    pub fn purge(&self) -> Result<(), IoError> {
        match fs::remove_file(&self.todo_file) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(IoError::Write {
                path: self.todo_file.clone(),
                source,
            }),
        }
    }

    /// Whether the active store was modified strictly after `since`.
    ///
    /// A `None` timestamp means "beginning of time": true whenever the
    /// store exists. A missing store is never modified.
    #[must_use]
    pub fn todo_modified_since(&self, since: Option<OffsetDateTime>) -> bool {
        modified_since(&self.todo_file, since)
    }

    /// Whether the archive store was modified strictly after `since`; same
    /// timestamp semantics as [`todo_modified_since`](Self::todo_modified_since).
    #[must_use]
    pub fn done_modified_since(&self, since: Option<OffsetDateTime>) -> bool {
        modified_since(&self.done_file, since)
    }
}

fn modified_since(path: &Path, since: Option<OffsetDateTime>) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    let Ok(modified) = metadata.modified() else {
        return false;
    };
    since.is_none_or(|since| OffsetDateTime::from(modified) > since)
}
