//! Task operations behind the CLI verbs.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use plaintask_app::{ActiveFilter, AppConfig, IoError, TaskRepository};
use plaintask_core::filter::TaskFilter;
use plaintask_core::{Priority, SortKey, Task, sort};
use time::{Date, OffsetDateTime};
use tracing::debug;

use crate::ListArgs;

/// Service facade owning the repository and configuration; every CLI verb
/// goes through here.
pub struct TaskService {
    repository: TaskRepository,
    config: AppConfig,
}

impl TaskService {
    /// Build the service for a data directory.
    #[must_use]
    pub fn new(dir: &Path, config: AppConfig) -> Self {
        let repository = TaskRepository::new(
            config.todo_path(dir),
            config.done_path(dir),
            config.line_ending,
        );
        Self { repository, config }
    }

    /// Print tasks matching the filter flags, sorted, numbered by their
    /// position in the active store.
    pub fn list(&self, args: &ListArgs) -> Result<()> {
        let tasks = match self.repository.load() {
            Ok(tasks) => tasks,
            Err(IoError::Missing { .. }) => {
                println!("no task store yet; `plaintask add` creates one");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        debug!(total = tasks.len(), "loaded active store");

        let filter = build_filter(args)?;
        let keys = filter.effective_sort(&self.config.default_sort);
        let conjunction = filter.conjunction();

        let mut visible: Vec<(usize, Task)> = tasks
            .into_iter()
            .enumerate()
            .map(|(index, task)| (index + 1, task))
            .filter(|(_, task)| args.all || !task.is_completed())
            .filter(|(_, task)| conjunction.apply(task))
            .collect();
        visible.sort_by(|(_, a), (_, b)| sort::compare_with_keys(&keys, a, b));

        for (position, task) in &visible {
            println!("{position:>3} {}", task.in_file_format());
        }
        Ok(())
    }

    /// Append a new task line to the active store, creating it on first use.
    pub fn add(&self, text: &str, stamp_date: bool) -> Result<()> {
        self.repository
            .create_if_missing()
            .context("creating the active store")?;
        let mut tasks = self.load_active()?;

        let mut task = Task::parse(text);
        if stamp_date && task.creation_date().is_none() {
            task.set_creation_date(Some(today()));
        }
        let line = task.in_file_format();
        tasks.push(task);

        self.repository
            .store(&tasks)
            .context("storing the updated list")?;
        println!("added: {line}");
        Ok(())
    }

    /// Mark the task at `position` complete, stamped with today's date.
    pub fn complete(&self, position: usize) -> Result<()> {
        self.edit_task(position, |task| task.complete(Some(today())))
    }

    /// Set (or clear, with `-`) the priority of the task at `position`.
    pub fn set_priority(&self, position: usize, grade: &str) -> Result<()> {
        let grade = Priority::from_code(grade)
            .ok_or_else(|| anyhow!("priority must be a letter A-Z, or `-` to clear"))?;
        self.edit_task(position, |task| task.set_priority(grade))
    }

    /// Move completed tasks to the archive store.
    pub fn archive(&self) -> Result<()> {
        let tasks = self.load_active()?;
        let archived = self.repository.archive(&tasks)?;
        println!("archived {archived} completed task(s)");
        Ok(())
    }

    fn edit_task(&self, position: usize, edit: impl FnOnce(&mut Task)) -> Result<()> {
        let mut tasks = self.load_active()?;
        let index = position
            .checked_sub(1)
            .filter(|&index| index < tasks.len())
            .ok_or_else(|| anyhow!("no task at position {position}"))?;

        edit(&mut tasks[index]);
        let line = tasks[index].in_file_format();

        self.repository
            .store(&tasks)
            .context("storing the updated list")?;
        println!("{position:>3} {line}");
        Ok(())
    }

    fn load_active(&self) -> Result<Vec<Task>> {
        self.repository.load().context("loading the active store")
    }
}

fn build_filter(args: &ListArgs) -> Result<ActiveFilter> {
    let priorities = args
        .priorities
        .iter()
        .map(|code| {
            Priority::from_code(code)
                .ok_or_else(|| anyhow!("invalid priority {code:?}; use A-Z or `-`"))
        })
        .collect::<Result<Vec<_>>>()?;
    let sorts = args
        .sorts
        .iter()
        .map(|key| key.parse::<SortKey>().map_err(anyhow::Error::from))
        .collect::<Result<Vec<_>>>()?;

    let mut filter = ActiveFilter::new();
    filter.set_priorities(priorities);
    filter.set_priorities_not(args.invert_priority);
    filter.set_contexts(normalize_tags(&args.contexts, '@'));
    filter.set_contexts_not(args.invert_context);
    filter.set_projects(normalize_tags(&args.projects, '+'));
    filter.set_projects_not(args.invert_project);
    filter.set_search(args.search.clone());
    filter.set_sorts(sorts);
    Ok(filter)
}

fn normalize_tags(tags: &[String], sigil: char) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.strip_prefix(sigil).unwrap_or(tag).to_owned())
        .collect()
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
