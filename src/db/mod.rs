//! Database layer for the to-do list.
//!
//! There is no long-lived connection: every operation opens its own SQLite
//! connection through [`Database::with_conn`] and drops it before returning.

pub mod schema;
pub mod tasks;

use crate::error::{StoreError, StoreResult};
use crate::types::WriteOutcome;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Default time SQLite waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Handle describing where the database lives.
///
/// Cloning is cheap and holds no open connection.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Database {
    /// Create a handle for the database at the given path.
    ///
    /// Nothing is opened until the first operation runs.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection.
    fn connect(&self) -> StoreResult<Connection> {
        let unavailable = |source| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        };

        let conn = Connection::open(&self.path).map_err(unavailable)?;
        conn.busy_timeout(self.busy_timeout).map_err(unavailable)?;
        Ok(conn)
    }

    /// Execute a function with a freshly opened connection.
    ///
    /// The connection is closed when this returns, on success and on error.
    pub fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.connect()?;
        Ok(f(&conn)?)
    }

    /// Execute a single write statement.
    ///
    /// An unreachable database yields [`WriteOutcome::Skipped`] instead of an
    /// error. Statement failures are still returned as errors.
    fn write<F>(&self, operation: &'static str, f: F) -> StoreResult<WriteOutcome>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<usize>,
    {
        match self.with_conn(f) {
            Ok(rows_affected) => Ok(WriteOutcome::Written { rows_affected }),
            Err(e) if e.is_unavailable() => {
                warn!(operation, error = %e, "Skipping write, database unavailable");
                Ok(WriteOutcome::Skipped)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_fails_when_directory_is_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::new(dir.path().join("missing").join("todo.db"));

        let err = db.with_conn(|_| Ok(())).unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn connect_creates_database_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("todo.db");
        let db = Database::new(&path);

        db.with_conn(|conn| conn.execute_batch("CREATE TABLE scratch (x INTEGER)")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_reports_skipped_when_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::new(dir.path().join("missing").join("todo.db"));

        let outcome = db.write("test", |_| Ok(1)).unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
    }
}
