//! Task filter predicates.
//!
//! All active selectors are combined with logical AND. Input order is kept.

use crate::model::task::{Category, Priority, Task};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Selector that either matches every value or exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Returns whether `value` passes this selector.
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: Display> Display for Selection<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Parses `"all"` as [`Selection::All`], anything else through `T::from_str`.
impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// User-selected filter state for the task list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Free-text query matched against title and description.
    pub query: String,
    pub category: Selection<Category>,
    pub priority: Selection<Priority>,
}

impl TaskFilter {
    /// Filter that lets every task through.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: Selection<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: Selection<Priority>) -> Self {
        self.priority = priority;
        self
    }

    /// Returns whether any selector narrows the collection.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || !self.category.is_all() || !self.priority.is_all()
    }

    /// Returns whether `task` satisfies every active selector.
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_with_needle(task, &self.needle())
    }

    fn needle(&self) -> String {
        self.query.trim().to_lowercase()
    }

    fn matches_with_needle(&self, task: &Task, needle: &str) -> bool {
        self.category.accepts(&task.category)
            && self.priority.accepts(&task.priority)
            && (needle.is_empty()
                || task.title.to_lowercase().contains(needle)
                || task.description.to_lowercase().contains(needle))
    }
}

/// Returns the tasks accepted by `filter`, in input order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    let needle = filter.needle();
    tasks
        .iter()
        .filter(|task| filter.matches_with_needle(task, &needle))
        .collect()
}
