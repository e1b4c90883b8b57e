//! Task CRUD operations.

use super::Database;
use crate::error::StoreResult;
use crate::types::{Task, WriteOutcome};
use rusqlite::{OptionalExtension, Row, params};

pub fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        task: row.get("task")?,
        completed: row.get("completed")?,
    })
}

impl Database {
    /// List all tasks, most recently created first.
    pub fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, task, completed FROM todos ORDER BY id DESC")?;
            let tasks = stmt
                .query_map([], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Get a single task by id.
    pub fn get_task(&self, id: i64) -> StoreResult<Option<Task>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, task, completed FROM todos WHERE id = ?1",
                params![id],
                parse_task_row,
            )
            .optional()
        })
    }

    /// Insert a new, not yet completed task.
    ///
    /// The description is stored as given; one longer than the column allows
    /// fails with a storage error.
    pub fn create_task(&self, description: &str) -> StoreResult<WriteOutcome> {
        self.write("create_task", |conn| {
            conn.execute("INSERT INTO todos (task) VALUES (?1)", params![description])
        })
    }

    /// Mark a task completed. Matching no row is not an error.
    pub fn complete_task(&self, id: i64) -> StoreResult<WriteOutcome> {
        self.write("complete_task", |conn| {
            conn.execute("UPDATE todos SET completed = 1 WHERE id = ?1", params![id])
        })
    }

    /// Delete a task. Matching no row is not an error.
    pub fn delete_task(&self, id: i64) -> StoreResult<WriteOutcome> {
        self.write("delete_task", |conn| {
            conn.execute("DELETE FROM todos WHERE id = ?1", params![id])
        })
    }
}
