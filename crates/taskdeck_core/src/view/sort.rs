//! Task ordering modes.
//!
//! Every mode uses a stable sort, so equal keys keep their input order and
//! re-sorting an already sorted sequence is a no-op.

use crate::model::task::{Task, TaskValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Ordering applied to the filtered task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Earliest deadline first; undated tasks last.
    #[default]
    DueDate,
    /// Highest priority first.
    Priority,
    /// Newest task first.
    Created,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "due_date",
            Self::Priority => "priority",
            Self::Created => "created",
        }
    }

    /// Compares two tasks under this mode.
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::DueDate => match (a.due_date, b.due_date) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Priority => b.priority.rank().cmp(&a.priority.rank()),
            Self::Created => b.created_at.cmp(&a.created_at),
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = TaskValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "due_date" | "due-date" | "duedate" | "due" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "created" => Ok(Self::Created),
            _ => Err(TaskValidationError::InvalidSortMode(value.to_string())),
        }
    }
}

/// Sorts `tasks` in place under `mode`.
pub fn sort_tasks(tasks: &mut [&Task], mode: SortMode) {
    tasks.sort_by(|a, b| mode.compare(a, b));
}
