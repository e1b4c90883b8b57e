//! Schema bootstrap and introspection for the `todos` table.

use super::Database;
use crate::error::StoreResult;
use tracing::{debug, error, warn};

/// Name of the table holding tasks.
pub const TODOS_TABLE: &str = "todos";

/// DDL for the `todos` table. SQLite ignores `VARCHAR` widths, so the CHECK
/// carries the 255 character limit. `length()` stops at the first NUL, so
/// NUL characters are refused outright.
const CREATE_TODOS: &str = "
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        task VARCHAR(255) NOT NULL
            CHECK (length(task) <= 255 AND instr(CAST(task AS BLOB), x'00') = 0),
        completed BOOLEAN NOT NULL DEFAULT 0
    )";

/// Information about a table column.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

impl Database {
    /// Create the `todos` table if it does not exist.
    ///
    /// Safe to call on every start. Failures are logged and swallowed; later
    /// operations report the database as unavailable on their own.
    pub fn ensure_schema(&self) {
        match self.with_conn(|conn| conn.execute_batch(CREATE_TODOS)) {
            Ok(()) => debug!(path = %self.path().display(), "Schema ready"),
            Err(e) if e.is_unavailable() => {
                warn!(error = %e, "Could not connect to database, skipping schema setup");
            }
            Err(e) => error!(error = %e, "Failed to create todos table"),
        }
    }

    /// List the columns of a table, in declaration order.
    pub fn table_columns(&self, table: &str) -> StoreResult<Vec<ColumnInfo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM pragma_table_info(?1)")?;
            let columns = stmt
                .query_map([table], |row| {
                    let not_null: i32 = row.get("notnull")?;
                    let pk: i32 = row.get("pk")?;
                    Ok(ColumnInfo {
                        name: row.get("name")?,
                        data_type: row.get("type")?,
                        nullable: not_null == 0,
                        default_value: row.get("dflt_value")?,
                        primary_key: pk > 0,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(columns)
        })
    }
}
