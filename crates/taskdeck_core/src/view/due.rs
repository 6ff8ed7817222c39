//! Due-date urgency classification.
//!
//! # Invariants
//! - A completed task is always [`DueStatus::Normal`].
//! - `due == now` is due-soon, never overdue.

use crate::model::task::Task;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Width of the due-soon window measured from "now", in hours.
pub const DUE_SOON_WINDOW_HOURS: i64 = 24;

/// Urgency badge for a task relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DueStatus {
    Overdue,
    DueSoon,
    Normal,
}

impl DueStatus {
    /// Label prefix shown before the formatted due date.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Overdue => Some("Overdue"),
            Self::DueSoon => Some("Due soon"),
            Self::Normal => None,
        }
    }
}

/// Classifies `task` against `now`.
pub fn classify_due(task: &Task, now: DateTime<Utc>) -> DueStatus {
    let Some(due) = task.due_date else {
        return DueStatus::Normal;
    };
    if task.completed {
        return DueStatus::Normal;
    }

    if due < now {
        DueStatus::Overdue
    } else if due - now < Duration::hours(DUE_SOON_WINDOW_HOURS) {
        DueStatus::DueSoon
    } else {
        DueStatus::Normal
    }
}
