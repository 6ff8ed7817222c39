//! Pending/completed grouping and whole-collection stats.
//!
//! # Invariants
//! - `pending.len() + completed.len()` equals the filtered length.
//! - `stats` always describe the unfiltered collection.

use crate::model::task::Task;
use crate::view::filter::{filter_tasks, TaskFilter};
use crate::view::sort::{sort_tasks, SortMode};
use serde::{Deserialize, Serialize};

/// Aggregate counts over the full task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// Derived list view handed to presentation code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Filtered, sorted tasks with `completed == false`.
    pub pending: Vec<Task>,
    /// Filtered, sorted tasks with `completed == true`.
    pub completed: Vec<Task>,
    pub stats: TaskStats,
}

impl TaskView {
    /// Number of tasks that passed the filter.
    pub fn visible_len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_len() == 0
    }
}

/// Splits an ordered sequence by completion, keeping order within each group.
pub fn partition_tasks(ordered: &[&Task]) -> (Vec<Task>, Vec<Task>) {
    let mut pending = Vec::new();
    let mut completed = Vec::new();
    for task in ordered {
        if task.completed {
            completed.push((*task).clone());
        } else {
            pending.push((*task).clone());
        }
    }
    (pending, completed)
}

/// Runs filter, sort and partition over `tasks`.
pub fn build_task_view(tasks: &[Task], filter: &TaskFilter, sort: SortMode) -> TaskView {
    let mut visible = filter_tasks(tasks, filter);
    sort_tasks(&mut visible, sort);
    let (pending, completed) = partition_tasks(&visible);

    TaskView {
        pending,
        completed,
        stats: TaskStats::from_tasks(tasks),
    }
}
