//! CLI entry point for plaintask.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::TaskService;
use plaintask_app::AppConfig;

mod commands;

/// Plain-text task lists in todo.txt format.
#[derive(Parser, Debug)]
#[command(
    name = "plaintask",
    version,
    about = "plaintask: filter, sort and archive todo.txt task lists"
)]
struct Cli {
    /// Data directory holding the stores and plaintask.toml (defaults to current).
    #[arg(long)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks, filtered and sorted.
    List(ListArgs),

    /// Add a task line to the active store.
    Add {
        /// The todo.txt line to add.
        text: String,
        /// Stamp today's date as the creation date.
        #[arg(long)]
        date: bool,
    },

    /// Complete a task by its list position.
    Do {
        /// Position as printed by `list`.
        position: usize,
    },

    /// Set or clear a task's priority.
    Pri {
        /// Position as printed by `list`.
        position: usize,
        /// Letter grade A-Z, or `-` to clear.
        grade: String,
    },

    /// Move completed tasks to the archive store.
    Archive,
}

/// Filter and sort flags for `list`.
#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Allowed priorities: a letter A-Z, or `-` for unprioritized.
    #[arg(short = 'p', long = "priority")]
    priorities: Vec<String>,

    /// Invert the priority criterion.
    #[arg(long)]
    invert_priority: bool,

    /// Allowed contexts (with or without the `@`).
    #[arg(short = 'c', long = "context")]
    contexts: Vec<String>,

    /// Invert the context criterion.
    #[arg(long)]
    invert_context: bool,

    /// Allowed projects (with or without the `+`).
    #[arg(short = 'P', long = "project")]
    projects: Vec<String>,

    /// Invert the project criterion.
    #[arg(long)]
    invert_project: bool,

    /// Free-text search over task bodies.
    #[arg(short = 's', long)]
    search: Option<String>,

    /// Sort keys in `<+|->!<field>` form, e.g. `+!priority` or `-!project`.
    #[arg(long = "sort")]
    sorts: Vec<String>,

    /// Show completed tasks too.
    #[arg(short = 'a', long)]
    all: bool,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let dir = cli.dir.unwrap_or_else(|| PathBuf::from("."));
    let config = AppConfig::load(&dir)?;
    let service = TaskService::new(&dir, config);

    match cli.cmd {
        Command::List(args) => service.list(&args),
        Command::Add { text, date } => service.add(&text, date),
        Command::Do { position } => service.complete(position),
        Command::Pri { position, grade } => service.set_priority(position, &grade),
        Command::Archive => service.archive(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
