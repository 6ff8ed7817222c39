//! Command-line surface.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskdeck_core::{Category, Priority, Selection, SortMode};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Tasks and notes from the command line")]
#[command(version)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, env = "TASKDECK_DB", default_value = "taskdeck.sqlite3", global = true)]
    pub db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "TASKDECK_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "TASKDECK_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a task
    Add(AddArgs),
    /// Show pending and completed tasks with stats
    List(ListArgs),
    /// Toggle a task between pending and completed
    Done(IdArgs),
    /// Change fields of a task
    Edit(EditArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Show tasks by due date
    Calendar(CalendarArgs),
    /// Manage notes for the signed-in user
    #[command(subcommand)]
    Note(NoteCommands),
    /// Print core version
    Version,
}

#[derive(Args)]
pub struct AddArgs {
    pub title: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
    #[arg(short, long, default_value = "other")]
    pub category: Category,
    #[arg(short, long, default_value = "medium")]
    pub priority: Priority,
    /// Due date as YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against title and description.
    #[arg(short, long, default_value = "")]
    pub search: String,
    #[arg(short, long, default_value = "all")]
    pub category: Selection<Category>,
    #[arg(short, long, default_value = "all")]
    pub priority: Selection<Priority>,
    /// due_date|priority|created
    #[arg(long, default_value = "due_date")]
    pub sort: SortMode,
}

#[derive(Args)]
pub struct IdArgs {
    pub id: Uuid,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: Uuid,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub category: Option<Category>,
    #[arg(short, long)]
    pub priority: Option<Priority>,
    /// New due date as YYYY-MM-DD.
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,
    /// Remove the due date.
    #[arg(long)]
    pub clear_due: bool,
}

#[derive(Args)]
pub struct CalendarArgs {
    /// Month as YYYY-MM; defaults to the current month.
    #[arg(long)]
    pub month: Option<String>,
    /// List the tasks due on one day (YYYY-MM-DD) instead of the month grid.
    #[arg(long, conflicts_with = "month")]
    pub day: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Create a note
    Add(NoteAddArgs),
    /// List notes, most recently updated first
    List(UserArgs),
    /// Replace title and content of a note
    Edit(NoteEditArgs),
    /// Delete a note
    Rm(NoteIdArgs),
}

#[derive(Args)]
pub struct UserArgs {
    /// Signed-in user id supplied by the host auth provider.
    #[arg(long, env = "TASKDECK_USER")]
    pub user: Option<String>,
}

#[derive(Args)]
pub struct NoteAddArgs {
    #[command(flatten)]
    pub user: UserArgs,
    pub title: String,
    #[arg(default_value = "")]
    pub content: String,
}

#[derive(Args)]
pub struct NoteEditArgs {
    #[command(flatten)]
    pub user: UserArgs,
    pub id: Uuid,
    pub title: String,
    #[arg(default_value = "")]
    pub content: String,
}

#[derive(Args)]
pub struct NoteIdArgs {
    #[command(flatten)]
    pub user: UserArgs,
    pub id: Uuid,
}
