//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its closed value domains.
//! - Validate data-entry input (drafts, patches, enum strings) before it
//!   reaches storage or the view pipeline.
//!
//! # Invariants
//! - `id` and `created_at` are assigned once by [`Task::create`] and never
//!   change afterwards.
//! - `title` is stored trimmed and is never empty.
//! - `category` and `priority` are always one of the enumerated values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task grouping shown as a colored dot in list and calendar views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Health,
    #[default]
    Other,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 5] = [
        Category::Work,
        Category::Personal,
        Category::Shopping,
        Category::Health,
        Category::Other,
    ];

    /// Stable lowercase name used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "shopping" => Ok(Self::Shopping),
            "health" => Ok(Self::Health),
            "other" => Ok(Self::Other),
            _ => Err(TaskValidationError::InvalidCategory(value.to_string())),
        }
    }
}

/// Task urgency level.
///
/// Ordering follows [`Priority::rank`], so `High > Medium > Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Every priority from highest to lowest.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Numeric rank used by the priority sort: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Stable lowercase name used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskValidationError::InvalidPriority(value.to_string())),
        }
    }
}

/// Validation failures raised at the task data-entry boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Category string outside the enumerated domain.
    InvalidCategory(String),
    /// Priority string outside the enumerated domain.
    InvalidPriority(String),
    /// Sort mode string outside the enumerated domain.
    InvalidSortMode(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::InvalidCategory(value) => write!(
                f,
                "unsupported category `{value}`; expected work|personal|shopping|health|other"
            ),
            Self::InvalidPriority(value) => {
                write!(f, "unsupported priority `{value}`; expected low|medium|high")
            }
            Self::InvalidSortMode(value) => write!(
                f,
                "unsupported sort mode `{value}`; expected due_date|priority|created"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Never null; empty when the user left it blank.
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    /// `None` means "no deadline".
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Assigned once at creation; only used for the "created" sort.
    pub created_at: DateTime<Utc>,
}

/// User input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with default category/priority and no deadline.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an existing task.
///
/// `None` leaves a field untouched. `due_date: Some(None)` clears the
/// deadline. There is deliberately no way to touch `id` or `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Returns whether this patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }
}

impl Task {
    /// Builds a new task from a draft, assigning a fresh id and `created_at`.
    ///
    /// Title and description are trimmed; `completed` starts as `false`.
    ///
    /// # Errors
    /// - [`TaskValidationError::EmptyTitle`] when the trimmed title is empty.
    pub fn create(draft: TaskDraft, now: DateTime<Utc>) -> Result<Self, TaskValidationError> {
        let title = normalize_title(&draft.title)?;
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: draft.description.trim().to_string(),
            category: draft.category,
            priority: draft.priority,
            due_date: draft.due_date,
            completed: false,
            created_at: now,
        })
    }

    /// Applies a partial update in place.
    ///
    /// The patch is validated first, so a rejected patch leaves the task
    /// unchanged.
    pub fn apply(&mut self, patch: TaskPatch) -> Result<(), TaskValidationError> {
        let title = match patch.title {
            Some(value) => Some(normalize_title(&value)?),
            None => None,
        };

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        Ok(())
    }

    /// Flips the completion flag (the checkbox action).
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Checks invariants on a task that did not come through [`Task::create`],
    /// e.g. rows read back from storage.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

fn normalize_title(value: &str) -> Result<String, TaskValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Category, Priority, Task, TaskDraft, TaskPatch, TaskValidationError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn category_parse_is_case_insensitive_and_closed() {
        assert_eq!("Shopping".parse::<Category>(), Ok(Category::Shopping));
        assert_eq!(
            "errands".parse::<Category>(),
            Err(TaskValidationError::InvalidCategory("errands".to_string()))
        );
    }

    #[test]
    fn priority_orders_by_rank() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn rejected_patch_leaves_task_unchanged() {
        let now = Utc.with_ymd_and_hms(2025, 5, 22, 10, 0, 0).unwrap();
        let mut task = Task::create(TaskDraft::new("Write report"), now).unwrap();
        let before = task.clone();

        let err = task
            .apply(TaskPatch {
                title: Some("   ".to_string()),
                completed: Some(true),
                ..TaskPatch::default()
            })
            .unwrap_err();

        assert_eq!(err, TaskValidationError::EmptyTitle);
        assert_eq!(task, before);
    }
}
