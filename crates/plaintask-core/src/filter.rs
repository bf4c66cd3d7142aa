use crate::task::{Priority, Task};

/// Capability shared by every filter criterion.
pub trait TaskFilter {
    /// Whether the task passes this criterion.
    fn apply(&self, task: &Task) -> bool;
}

/// Match tasks whose priority is a member of an allowed set.
///
/// `Priority::NONE` is an ordinary member, so unprioritized tasks can be
/// selected (or excluded) like any grade.
pub struct ByPriorityFilter {
    allowed: Vec<Priority>,
    negate: bool,
}

impl ByPriorityFilter {
    /// Build from the allowed grades; `negate` inverts the match.
    #[must_use]
    pub const fn new(allowed: Vec<Priority>, negate: bool) -> Self {
        Self { allowed, negate }
    }
}

impl TaskFilter for ByPriorityFilter {
    fn apply(&self, task: &Task) -> bool {
        self.allowed.contains(&task.priority()) != self.negate
    }
}

/// Match tasks whose context set intersects an allowed set.
///
/// A task with no contexts never intersects, so it fails the positive form
/// and passes the negated one.
pub struct ByContextFilter {
    allowed: Vec<String>,
    negate: bool,
}

impl ByContextFilter {
    /// Build from the allowed context names; `negate` inverts the match.
    #[must_use]
    pub const fn new(allowed: Vec<String>, negate: bool) -> Self {
        Self { allowed, negate }
    }
}

impl TaskFilter for ByContextFilter {
    fn apply(&self, task: &Task) -> bool {
        let hit = task
            .contexts()
            .iter()
            .any(|context| self.allowed.iter().any(|allowed| allowed == context));
        hit != self.negate
    }
}

/// Match tasks whose project set intersects an allowed set.
pub struct ByProjectFilter {
    allowed: Vec<String>,
    negate: bool,
}

impl ByProjectFilter {
    /// Build from the allowed project names; `negate` inverts the match.
    #[must_use]
    pub const fn new(allowed: Vec<String>, negate: bool) -> Self {
        Self { allowed, negate }
    }
}

impl TaskFilter for ByProjectFilter {
    fn apply(&self, task: &Task) -> bool {
        let hit = task
            .projects()
            .iter()
            .any(|project| self.allowed.iter().any(|allowed| allowed == project));
        hit != self.negate
    }
}

/// Substring match over the task body, case-insensitive unless asked.
pub struct ByTextFilter {
    query: String,
    case_sensitive: bool,
}

impl ByTextFilter {
    /// Normalize a query into a filter. Blank queries yield `None`; callers
    /// omit the criterion instead of constructing a vacuous match.
    #[must_use]
    pub fn new(query: &str, case_sensitive: bool) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        let query = if case_sensitive {
            trimmed.to_owned()
        } else {
            trimmed.to_lowercase()
        };
        Some(Self { query, case_sensitive })
    }
}

impl TaskFilter for ByTextFilter {
    fn apply(&self, task: &Task) -> bool {
        if self.case_sensitive {
            task.text().contains(&self.query)
        } else {
            task.text().to_lowercase().contains(&self.query)
        }
    }
}

/// Conjunction of criteria. An empty conjunction accepts every task.
///
/// Negation happens per criterion before it enters the conjunction; the
/// conjunction itself is never negated.
#[derive(Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn TaskFilter>>,
}

impl AndFilter {
    /// Empty conjunction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion.
    pub fn push(&mut self, filter: Box<dyn TaskFilter>) {
        self.filters.push(filter);
    }

    /// Number of active criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no criteria are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl TaskFilter for AndFilter {
    fn apply(&self, task: &Task) -> bool {
        self.filters.iter().all(|filter| filter.apply(task))
    }
}
