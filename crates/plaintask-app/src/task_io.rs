//! Line-oriented codec between todo.txt stores and ordered task sequences.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use plaintask_core::Task;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Line terminator used when writing a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`.
    #[default]
    Unix,
    /// `\r\n`.
    Windows,
}

impl LineEnding {
    /// The terminator string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "\n",
            Self::Windows => "\r\n",
        }
    }
}

/// Failure while reading or writing a task store.
#[derive(Debug, Error)]
pub enum IoError {
    /// The store does not exist. Recoverable on an initial load; callers
    /// may treat it as "start with an empty list".
    #[error("task store {} does not exist", path.display())]
    Missing {
        /// Store path.
        path: PathBuf,
    },
    /// The store exists but could not be read.
    #[error("failed to read task store {}", path.display())]
    Read {
        /// Store path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The store could not be written.
    #[error("failed to write task store {}", path.display())]
    Write {
        /// Store path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Load tasks from a store, one per line, preserving file order.
///
/// # Errors
/// [`IoError::Missing`] when the store does not exist, [`IoError::Read`] for
/// any other read failure.
pub fn load(path: &Path) -> Result<Vec<Task>, IoError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            return Err(IoError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(IoError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    load_from_reader(BufReader::new(file)).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load tasks from a buffered reader. Lines that are empty after trimming
/// are skipped; both `\n` and `\r\n` terminators are accepted.
///
/// # Errors
/// Propagates the underlying read failure.
pub fn load_from_reader(reader: impl BufRead) -> Result<Vec<Task>, std::io::Error> {
    let mut tasks = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        tasks.push(Task::parse(&line));
    }
    Ok(tasks)
}

/// Serialize tasks into a store, one line per task, in the given order.
///
/// `append` adds to the end of an existing store instead of replacing it;
/// the store is created either way.
///
/// # Errors
/// [`IoError::Write`] on any open, write, or flush failure.
pub fn write(
    tasks: &[Task],
    path: &Path,
    line_ending: LineEnding,
    append: bool,
) -> Result<(), IoError> {
    let write_err = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    let file = options.open(path).map_err(write_err)?;

    let mut writer = BufWriter::new(file);
    for task in tasks {
        writer
            .write_all(task.in_file_format().as_bytes())
            .map_err(write_err)?;
        writer
            .write_all(line_ending.as_str().as_bytes())
            .map_err(write_err)?;
    }
    writer.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn ok<T, E: std::fmt::Display>(result: Result<T, E>, context: &str) -> T {
        result.unwrap_or_else(|err| panic!("{context}: {err}"))
    }

    #[test]
    fn write_then_load_preserves_order_and_content() {
        let dir = ok(tempdir(), "tempdir");
        let path = dir.path().join("todo.txt");
        let tasks = vec![
            Task::parse("(B) renew passport @townhall"),
            Task::parse("(A) book flights +trip"),
            Task::parse("x 2024-01-01 pack bags +trip"),
        ];

        ok(
            write(&tasks, &path, LineEnding::Unix, false),
            "write store",
        );
        let loaded = ok(load(&path), "load store");

        let lines: Vec<String> = loaded.iter().map(Task::in_file_format).collect();
        let expected: Vec<String> = tasks.iter().map(Task::in_file_format).collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn load_skips_blank_lines() {
        let dir = ok(tempdir(), "tempdir");
        let path = dir.path().join("todo.txt");
        ok(
            fs::write(&path, "first task\n\n   \nsecond task\n\n"),
            "seed store",
        );

        let loaded = ok(load(&path), "load store");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].text(), "first task");
        assert_eq!(loaded[1].text(), "second task");
    }

    #[test]
    fn load_accepts_crlf_terminators() {
        let dir = ok(tempdir(), "tempdir");
        let path = dir.path().join("todo.txt");
        ok(fs::write(&path, "one @here\r\ntwo @there\r\n"), "seed store");

        let loaded = ok(load(&path), "load store");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].contexts(), ["here"]);
    }

    #[test]
    fn missing_store_is_its_own_error() {
        let dir = ok(tempdir(), "tempdir");
        let result = load(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(IoError::Missing { .. })));
    }

    #[test]
    fn append_keeps_existing_lines() {
        let dir = ok(tempdir(), "tempdir");
        let path = dir.path().join("done.txt");

        ok(
            write(&[Task::parse("x first")], &path, LineEnding::Unix, false),
            "initial write",
        );
        ok(
            write(&[Task::parse("x second")], &path, LineEnding::Unix, true),
            "append",
        );

        let contents = ok(fs::read_to_string(&path), "read back");
        assert_eq!(contents, "x first\nx second\n");
    }

    #[test]
    fn windows_line_endings_are_honored() {
        let dir = ok(tempdir(), "tempdir");
        let path = dir.path().join("todo.txt");
        ok(
            write(
                &[Task::parse("one"), Task::parse("two")],
                &path,
                LineEnding::Windows,
                false,
            ),
            "write store",
        );

        let contents = ok(fs::read_to_string(&path), "read back");
        assert_eq!(contents, "one\r\ntwo\r\n");
    }

    #[test]
    fn write_failure_names_the_store() {
        let dir = ok(tempdir(), "tempdir");
        let path = dir.path().join("no-such-dir").join("todo.txt");
        let result = write(&[Task::parse("task")], &path, LineEnding::Unix, false);
        assert!(matches!(result, Err(IoError::Write { .. })));
    }
}
