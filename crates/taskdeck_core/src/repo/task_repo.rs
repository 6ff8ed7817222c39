//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - `list_tasks` returns tasks in insertion order.
//! - `update_task` never rewrites `id` or `created_at`.
//! - `delete_task` is a hard delete.

use super::{from_epoch_ms, parse_uuid, to_epoch_ms, RepoError, RepoResult};
use crate::model::task::{Task, TaskId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    category,
    priority,
    due_at,
    completed,
    created_at
FROM tasks";

/// Storage capability for the authoritative task collection.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                category,
                priority,
                due_at,
                completed,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task.id.to_string(),
                task.title.as_str(),
                task.description.as_str(),
                task.category.as_str(),
                task.priority.as_str(),
                task.due_date.map(to_epoch_ms),
                task.completed,
                to_epoch_ms(task.created_at),
            ],
        )?;

        Ok(task.id)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let columns = stmt
            .query_row([id.to_string()], read_task_columns)
            .optional()?;

        columns.map(TaskColumns::into_task).transpose()
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(read_task_columns(row)?.into_task()?);
        }

        Ok(tasks)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                category = ?3,
                priority = ?4,
                due_at = ?5,
                completed = ?6
             WHERE id = ?7;",
            params![
                task.title.as_str(),
                task.description.as_str(),
                task.category.as_str(),
                task.priority.as_str(),
                task.due_date.map(to_epoch_ms),
                task.completed,
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

/// Undecoded `tasks` row.
struct TaskColumns {
    id: String,
    title: String,
    description: String,
    category: String,
    priority: String,
    due_at: Option<i64>,
    completed: i64,
    created_at: i64,
}

fn read_task_columns(row: &Row<'_>) -> rusqlite::Result<TaskColumns> {
    Ok(TaskColumns {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        category: row.get("category")?,
        priority: row.get("priority")?,
        due_at: row.get("due_at")?,
        completed: row.get("completed")?,
        created_at: row.get("created_at")?,
    })
}

impl TaskColumns {
    fn into_task(self) -> RepoResult<Task> {
        let category = self.category.parse().map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid category `{}` in tasks.category",
                self.category
            ))
        })?;
        let priority = self.priority.parse().map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid priority `{}` in tasks.priority",
                self.priority
            ))
        })?;
        let completed = match self.completed {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid completed value `{other}` in tasks.completed"
                )));
            }
        };
        let due_date = match self.due_at {
            Some(value) => Some(from_epoch_ms(value, "tasks.due_at")?),
            None => None,
        };

        let task = Task {
            id: parse_uuid(&self.id, "tasks.id")?,
            title: self.title,
            description: self.description,
            category,
            priority,
            due_date,
            completed,
            created_at: from_epoch_ms(self.created_at, "tasks.created_at")?,
        };
        task.validate()?;
        Ok(task)
    }
}
