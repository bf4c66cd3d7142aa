//! Domain types for todo.txt task lists: the line grammar, the filter
//! predicate family, and multi-key sorting.

/// Filter predicates over tasks.
pub mod filter;
/// Sort keys and per-field comparators.
pub mod sort;
/// Task parsing and serialization.
pub mod task;

pub use filter::{AndFilter, ByContextFilter, ByPriorityFilter, ByProjectFilter, ByTextFilter, TaskFilter};
pub use sort::{ParseSortKeyError, SortField, SortKey};
pub use task::{Priority, Task};
