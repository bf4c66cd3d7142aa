//! Orchestration over the todo.txt domain types: the active filter
//! configuration and its persistence surfaces, the line-oriented store
//! codec, the flat-file repository, and application configuration.

/// Canonical filter configuration and its three persistence surfaces.
pub mod active_filter;
/// Application configuration file.
pub mod config;
/// Line-oriented codec between stores and task sequences.
pub mod task_io;
/// Flat-file repository orchestration.
pub mod task_repository;

pub use active_filter::ActiveFilter;
pub use config::AppConfig;
pub use task_io::{IoError, LineEnding};
pub use task_repository::{ArchiveError, TaskRepository};
