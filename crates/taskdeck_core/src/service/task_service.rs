//! Task use-case service.
//!
//! # Responsibility
//! - Validate data-entry input, stamp records with the injected clock and
//!   delegate persistence to a [`TaskRepository`].
//! - Re-run the view pipeline over the authoritative collection on demand.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - `created_at` comes from the service clock, never from caller input.
//! - Log events carry ids and statuses only, never titles or descriptions.

use crate::clock::Clock;
use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::view::calendar::{tasks_due_on, CalendarDay, CalendarMonth};
use crate::view::due::{classify_due, DueStatus};
use crate::view::filter::TaskFilter;
use crate::view::partition::{build_task_view, TaskView};
use crate::view::sort::SortMode;
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Input rejected at the data-entry boundary.
    Validation(TaskValidationError),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but read-back disagrees.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            RepoError::TaskValidation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Task service facade over a repository and a clock.
pub struct TaskService<R: TaskRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: TaskRepository, C: Clock> TaskService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Creates a task from user input.
    ///
    /// # Contract
    /// - Assigns a fresh id and `created_at = clock.now()`.
    /// - Starts with `completed = false`.
    /// - Returns the stored record as read back from the repository.
    pub fn create_task(&self, draft: TaskDraft) -> TaskServiceResult<Task> {
        let task = match Task::create(draft, self.clock.now()) {
            Ok(task) => task,
            Err(err) => {
                warn!("event=task_create module=service status=rejected reason={err}");
                return Err(err.into());
            }
        };

        let id = self.repo.create_task(&task)?;
        info!("event=task_create module=service status=ok task_id={id}");
        self.read_back(id, "created task not found in read-back")
    }

    /// Applies a partial update to an existing task.
    pub fn update_task(&self, id: TaskId, patch: TaskPatch) -> TaskServiceResult<Task> {
        let mut task = self.require_task(id)?;
        if patch.is_empty() {
            return Ok(task);
        }

        task.apply(patch)?;
        self.repo.update_task(&task)?;
        info!("event=task_update module=service status=ok task_id={id}");
        self.read_back(id, "updated task not found in read-back")
    }

    /// Flips the completion flag of one task.
    pub fn toggle_completed(&self, id: TaskId) -> TaskServiceResult<Task> {
        let mut task = self.require_task(id)?;
        task.toggle_completed();
        self.repo.update_task(&task)?;
        info!(
            "event=task_toggle module=service status=ok task_id={id} completed={}",
            task.completed
        );
        Ok(task)
    }

    /// Deletes one task permanently.
    pub fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(())
    }

    pub fn get_task(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repo.get_task(id)?)
    }

    /// Returns the full collection in insertion order.
    pub fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks()?)
    }

    /// Loads the collection and derives the list view for the selection.
    pub fn task_view(&self, filter: &TaskFilter, sort: SortMode) -> TaskServiceResult<TaskView> {
        let tasks = self.repo.list_tasks()?;
        Ok(build_task_view(&tasks, filter, sort))
    }

    /// Classifies `task` against the service clock.
    pub fn due_status(&self, task: &Task) -> DueStatus {
        classify_due(task, self.clock.now())
    }

    /// Calendar cells for `month`.
    pub fn calendar_month(&self, month: CalendarMonth) -> TaskServiceResult<Vec<CalendarDay>> {
        let tasks = self.repo.list_tasks()?;
        Ok(month.grid(&tasks))
    }

    /// Tasks due on one calendar day.
    pub fn tasks_due_on(&self, date: NaiveDate) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.repo.list_tasks()?;
        Ok(tasks_due_on(&tasks, date).into_iter().cloned().collect())
    }

    /// Month containing the current clock date.
    pub fn current_month(&self) -> CalendarMonth {
        CalendarMonth::containing(self.clock.now().date_naive())
    }

    fn require_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    fn read_back(&self, id: TaskId, details: &'static str) -> TaskServiceResult<Task> {
        self.repo
            .get_task(id)?
            .ok_or(TaskServiceError::InconsistentState(details))
    }
}
