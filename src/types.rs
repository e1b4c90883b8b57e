//! Core types for the to-do list.

use serde::{Deserialize, Serialize};

/// Maximum length of a task description, enforced by the `todos` table.
pub const MAX_TASK_LEN: usize = 255;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    /// Free-text description, stored in the `task` column.
    pub task: String,
    pub completed: bool,
}

/// Result of a write against the database.
///
/// Writes never fail because storage is unreachable; they report `Skipped`
/// so the caller can tell a persisted change from one that was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The statement ran. `rows_affected` is 0 when an id matched nothing.
    Written { rows_affected: usize },
    /// No connection could be opened, nothing was written.
    Skipped,
}

impl WriteOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }

    pub fn rows_affected(&self) -> usize {
        match self {
            WriteOutcome::Written { rows_affected } => *rows_affected,
            WriteOutcome::Skipped => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_affects_no_rows() {
        assert_eq!(WriteOutcome::Skipped.rows_affected(), 0);
        assert!(!WriteOutcome::Skipped.is_written());
        assert!(WriteOutcome::Written { rows_affected: 0 }.is_written());
    }

    #[test]
    fn task_serializes_with_column_names() {
        let task = Task {
            id: 1,
            task: "Buy milk".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "task": "Buy milk", "completed": false})
        );
    }
}
