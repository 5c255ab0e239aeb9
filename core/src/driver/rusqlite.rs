//! SQLite collaborator using [`rusqlite`].
//!
//! SQLite reads `$1`, `$2`, ... as named parameters and numbers them in order
//! of first appearance, so the generated value lists bind positionally. Casts
//! use PostgreSQL syntax and are not understood by SQLite; leave them empty.
//!
//! ```
//! use bulk_insert_core::BulkInsert;
//! use rusqlite::types::Value;
//!
//! let mut conn = rusqlite::Connection::open_in_memory()?;
//! conn.execute("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)", [])?;
//!
//! let insert = BulkInsert::new("INSERT INTO users (id, name) VALUES <values>", ["", ""])?;
//! let rows = vec![
//!     vec![Value::Integer(1), Value::Text("Alice".into())],
//!     vec![Value::Integer(2), Value::Text("Bob".into())],
//! ];
//!
//! let result = insert.execute(&mut conn, &rows)?;
//! assert_eq!(result.rows_affected(), 2);
//! assert_eq!(result.last_insert_id(), Some(2));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use ::rusqlite::types::Value;
use ::rusqlite::{Connection as SqliteConnection, Error, params_from_iter};

use super::SQLITE_MAX_BIND_VARS;
use crate::connection::{Connection, Statement};
use crate::result::BatchResult;

/// Statement prepared on a [`rusqlite::Connection`], finalized on drop.
pub struct RusqliteStatement<'c> {
    conn: &'c SqliteConnection,
    stmt: ::rusqlite::Statement<'c>,
}

impl Connection for SqliteConnection {
    type Value = Value;
    type Error = Error;
    type Statement<'c>
        = RusqliteStatement<'c>
    where
        Self: 'c;

    const MAX_BIND_VARS: usize = SQLITE_MAX_BIND_VARS;

    fn prepare(&mut self, sql: &str) -> Result<RusqliteStatement<'_>, Error> {
        let conn: &SqliteConnection = self;
        let stmt = conn.prepare(sql)?;
        Ok(RusqliteStatement { conn, stmt })
    }
}

impl Statement for RusqliteStatement<'_> {
    type Value = Value;
    type Error = Error;

    fn execute(&mut self, args: &[&Value]) -> Result<BatchResult, Error> {
        let rows = self.stmt.execute(params_from_iter(args))?;
        Ok(BatchResult::new(
            rows as u64,
            Some(self.conn.last_insert_rowid()),
        ))
    }
}
