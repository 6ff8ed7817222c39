//! Core domain logic for TaskDeck.
//! This crate is the single source of truth for task and note invariants and
//! for the task list derivation pipeline.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::task::{
    Category, Priority, Task, TaskDraft, TaskId, TaskPatch, TaskValidationError,
};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::note_service::{
    derive_note_preview, NoteRecord, NoteService, NoteServiceError, NoteServiceResult,
};
pub use service::task_service::{TaskService, TaskServiceError, TaskServiceResult};
pub use session::{Session, SessionProvider, StaticSession, UserId};
pub use view::calendar::{tasks_due_on, CalendarDay, CalendarMonth};
pub use view::due::{classify_due, DueStatus, DUE_SOON_WINDOW_HOURS};
pub use view::filter::{filter_tasks, Selection, TaskFilter};
pub use view::partition::{build_task_view, partition_tasks, TaskStats, TaskView};
pub use view::sort::{sort_tasks, SortMode};

/// Minimal health-check API for front-end wiring probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
