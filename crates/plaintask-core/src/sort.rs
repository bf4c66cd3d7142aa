use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::Task;

/// Direction marker for an ascending sort key.
pub const NORMAL_SORT: char = '+';
/// Direction marker for a reversed sort key.
pub const REVERSED_SORT: char = '-';
/// Separator between direction and field in the wire form.
pub const SORT_SEPARATOR: char = '!';

/// Sortable task field.
///
/// Each variant documents its absent-value policy; values of the field
/// always sort before tasks that lack them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    /// Incomplete tasks before completed ones.
    Completed,
    /// Letter grades ascending, unprioritized tasks last.
    Priority,
    /// Smallest project tag, case-insensitive; untagged tasks last.
    Project,
    /// Smallest context tag, case-insensitive; untagged tasks last.
    Context,
    /// Creation date ascending; undated tasks last, mutually equal.
    CreationDate,
    /// Completion date ascending; undated tasks last, mutually equal.
    CompletionDate,
    /// Case-insensitive comparison of the body text.
    Alphabetical,
}

impl SortField {
    /// Wire name used in sort keys and configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Priority => "priority",
            Self::Project => "project",
            Self::Context => "context",
            Self::CreationDate => "creation-date",
            Self::CompletionDate => "completion-date",
            Self::Alphabetical => "alphabetical",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "completed" => Some(Self::Completed),
            "priority" => Some(Self::Priority),
            "project" => Some(Self::Project),
            "context" => Some(Self::Context),
            "creation-date" => Some(Self::CreationDate),
            "completion-date" => Some(Self::CompletionDate),
            "alphabetical" => Some(Self::Alphabetical),
            _ => None,
        }
    }

    /// Natural (unreversed) ordering of two tasks under this field.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Completed => a.is_completed().cmp(&b.is_completed()),
            Self::Priority => a.priority().cmp(&b.priority()),
            Self::Project => compare_tag_sets(a.projects(), b.projects()),
            Self::Context => compare_tag_sets(a.contexts(), b.contexts()),
            Self::CreationDate => compare_present_first(a.creation_date(), b.creation_date()),
            Self::CompletionDate => compare_present_first(a.completion_date(), b.completion_date()),
            Self::Alphabetical => a.text().to_lowercase().cmp(&b.text().to_lowercase()),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ordering pass: a field plus an optional reversal.
///
/// Wire form is `<direction>!<field>`, e.g. `+!priority` or `-!project`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Whether the natural ordering is reversed.
    pub reversed: bool,
    /// The field this key orders by.
    pub field: SortField,
}

impl SortKey {
    /// Ascending key for a field.
    #[must_use]
    pub const fn ascending(field: SortField) -> Self {
        Self {
            reversed: false,
            field,
        }
    }

    /// Descending key for a field.
    #[must_use]
    pub const fn descending(field: SortField) -> Self {
        Self {
            reversed: true,
            field,
        }
    }

    /// Ordering of two tasks under this key, reversal applied.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        let ordering = self.field.compare(a, b);
        if self.reversed { ordering.reverse() } else { ordering }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.reversed { REVERSED_SORT } else { NORMAL_SORT };
        write!(f, "{direction}{SORT_SEPARATOR}{}", self.field.as_str())
    }
}

/// Failure to decode a `<direction>!<field>` sort key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSortKeyError {
    /// The `!` separator is missing.
    #[error("sort key {key:?} is missing the `!` separator")]
    MissingSeparator {
        /// Offending input.
        key: String,
    },
    /// The direction marker is not `+` or `-`.
    #[error("sort key {key:?} must start with `+` or `-`")]
    UnknownDirection {
        /// Offending input.
        key: String,
    },
    /// The field name is not recognized.
    #[error("sort key {key:?} names an unknown field")]
    UnknownField {
        /// Offending input.
        key: String,
    },
}

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, field) =
            s.split_once(SORT_SEPARATOR)
                .ok_or_else(|| ParseSortKeyError::MissingSeparator {
                    key: s.to_owned(),
                })?;
        let reversed = match direction {
            "+" => false,
            "-" => true,
            _ => {
                return Err(ParseSortKeyError::UnknownDirection {
                    key: s.to_owned(),
                });
            }
        };
        let field = SortField::from_name(field).ok_or_else(|| ParseSortKeyError::UnknownField {
            key: s.to_owned(),
        })?;
        Ok(Self { reversed, field })
    }
}

/// Ordering of two tasks under a key chain; each later key is consulted only
/// to break ties left by the previous one.
#[must_use]
pub fn compare_with_keys(keys: &[SortKey], a: &Task, b: &Task) -> Ordering {
    keys.iter().fold(Ordering::Equal, |ordering, key| {
        ordering.then_with(|| key.compare(a, b))
    })
}

/// Stable in-place sort by the configured key chain; tasks equal under every
/// key keep their input order.
pub fn sort_tasks(tasks: &mut [Task], keys: &[SortKey]) {
    tasks.sort_by(|a, b| compare_with_keys(keys, a, b));
}

fn compare_tag_sets(a: &[String], b: &[String]) -> Ordering {
    compare_present_first(smallest_tag(a), smallest_tag(b))
}

fn smallest_tag(tags: &[String]) -> Option<String> {
    tags.iter().map(|tag| tag.to_lowercase()).min()
}

fn compare_present_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
