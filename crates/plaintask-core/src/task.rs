use std::cmp::Ordering;
use std::fmt;

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Task priority: a letter grade `A`-`Z`, or none.
///
/// The wire code for "none" is `-`, which makes unprioritized tasks a
/// selectable member of priority filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Priority(Option<char>);

impl Priority {
    /// The "no priority" value.
    pub const NONE: Self = Self(None);

    /// Build a priority from a single uppercase letter.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        letter.is_ascii_uppercase().then_some(Self(Some(letter)))
    }

    /// Decode a wire code: a letter `A`-`Z`, or `-` for none.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        if code == "-" {
            return Some(Self::NONE);
        }
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => None,
        }
    }

    /// Wire code for this priority (`-` when none).
    #[must_use]
    pub fn code(self) -> String {
        self.0.map_or_else(|| "-".to_owned(), |letter| letter.to_string())
    }

    /// The letter grade, if one is assigned.
    #[must_use]
    pub const fn letter(self) -> Option<char> {
        self.0
    }

    /// Whether this is the "no priority" value.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0.is_none()
    }
}

impl Ord for Priority {
    /// Letter grades ascend `A` through `Z`; "none" sorts after every grade.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// Parsed representation of one todo.txt line.
///
/// Parsing is total: any line yields a task, with unrecognized content left
/// in the body and the original text kept verbatim for fallback display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    raw: String,
    completed: bool,
    completion_date: Option<Date>,
    creation_date: Option<Date>,
    priority: Priority,
    body: String,
    projects: Vec<String>,
    contexts: Vec<String>,
}

impl Task {
    /// Parse a single todo.txt line.
    ///
    /// Prefixes are recognized left to right: `x ` plus an optional
    /// completion date, a `(A) ` priority, then an optional creation date.
    /// Everything after is the body; `+project` and `@context` tokens are
    /// collected (first occurrence order, duplicates dropped) but stay part
    /// of the body text.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut rest = line.trim();

        let mut completed = false;
        let mut completion_date = None;
        if let Some(after) = rest.strip_prefix("x ") {
            completed = true;
            rest = after.trim_start();
            if let Some((date, after)) = take_date(rest) {
                completion_date = Some(date);
                rest = after;
            }
        }

        let mut priority = Priority::NONE;
        if let Some((grade, after)) = take_priority(rest) {
            priority = grade;
            rest = after;
        }

        let mut creation_date = None;
        if let Some((date, after)) = take_date(rest) {
            creation_date = Some(date);
            rest = after;
        }

        let body = rest.to_owned();
        let (projects, contexts) = scan_tags(&body);

        Self {
            raw: line.to_owned(),
            completed,
            completion_date,
            creation_date,
            priority,
            body,
            projects,
            contexts,
        }
    }

    /// Serialize back into todo.txt line form.
    ///
    /// Re-parsing the result yields a field-equivalent task; for lines that
    /// came straight from a file this reproduces the input, modulo the
    /// leading/trailing whitespace trim the format defines.
    #[must_use]
    pub fn in_file_format(&self) -> String {
        let mut line = String::new();
        if self.completed {
            line.push_str("x ");
            if let Some(date) = self.completion_date {
                line.push_str(&format_date(date));
                line.push(' ');
            }
        }
        if let Some(letter) = self.priority.letter() {
            line.push('(');
            line.push(letter);
            line.push_str(") ");
        }
        if let Some(date) = self.creation_date {
            line.push_str(&format_date(date));
            line.push(' ');
        }
        line.push_str(&self.body);
        line.trim_end().to_owned()
    }

    /// The original line this task was parsed from, verbatim.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the task carries the completion marker.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Completion date, present only when the line carried one.
    #[must_use]
    pub const fn completion_date(&self) -> Option<Date> {
        self.completion_date
    }

    /// Creation date, when the line carried one in the recognized position.
    #[must_use]
    pub const fn creation_date(&self) -> Option<Date> {
        self.creation_date
    }

    /// Priority grade.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Body text (prefixes stripped, tags still embedded); the substring
    /// search target.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Project tags in first-occurrence order.
    #[must_use]
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Context tags in first-occurrence order.
    #[must_use]
    pub fn contexts(&self) -> &[String] {
        &self.contexts
    }

    /// Mark the task complete, optionally stamping a completion date.
    pub fn complete(&mut self, date: Option<Date>) {
        self.completed = true;
        self.completion_date = date;
    }

    /// Clear the completion marker and its date.
    pub fn uncomplete(&mut self) {
        self.completed = false;
        self.completion_date = None;
    }

    /// Replace the priority grade.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Set or clear the creation date.
    pub const fn set_creation_date(&mut self, date: Option<Date>) {
        self.creation_date = date;
    }

    /// Replace the body text, re-deriving project and context tags.
    pub fn set_text(&mut self, text: &str) {
        self.body = text.trim().to_owned();
        let (projects, contexts) = scan_tags(&self.body);
        self.projects = projects;
        self.contexts = contexts;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.in_file_format())
    }
}

fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

/// Split a leading `YYYY-MM-DD` token off `input`, which must already be
/// left-trimmed. Returns the date and the left-trimmed remainder.
fn take_date(input: &str) -> Option<(Date, &str)> {
    let token = input.split_whitespace().next()?;
    let date = Date::parse(token, DATE_FORMAT).ok()?;
    Some((date, input[token.len()..].trim_start()))
}

/// Split a leading `(A)` priority marker off `input`. The marker must be
/// followed by whitespace or end the line.
fn take_priority(input: &str) -> Option<(Priority, &str)> {
    let bytes = input.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'(' || bytes[2] != b')' {
        return None;
    }
    let grade = Priority::from_letter(char::from(bytes[1]))?;
    match bytes.get(3) {
        None => Some((grade, "")),
        Some(b' ') => Some((grade, input[4..].trim_start())),
        Some(_) => None,
    }
}

fn scan_tags(body: &str) -> (Vec<String>, Vec<String>) {
    let mut projects: Vec<String> = Vec::new();
    let mut contexts: Vec<String> = Vec::new();
    for token in body.split_whitespace() {
        if let Some(name) = token.strip_prefix('+') {
            if !name.is_empty() && !projects.iter().any(|existing| existing == name) {
                projects.push(name.to_owned());
            }
        } else if let Some(name) = token.strip_prefix('@') {
            if !name.is_empty() && !contexts.iter().any(|existing| existing == name) {
                contexts.push(name.to_owned());
            }
        }
    }
    (projects, contexts)
}
