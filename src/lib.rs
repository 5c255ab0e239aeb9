//! # bulk-insert
//!
//! Multi-row INSERT statements split into batches that stay under the bind
//! parameter limit of the database.
//!
//! ## Quick Start
//!
#![cfg_attr(
    feature = "rusqlite",
    doc = r#"
```rust
use bulk_insert::prelude::*;
use rusqlite::types::Value;

let mut conn = rusqlite::Connection::open_in_memory()?;
conn.execute("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)", [])?;

let insert = BulkInsert::new("INSERT INTO users (id, name) VALUES <values>", ["", ""])?;
let rows: Vec<Vec<Value>> = (0..100_000)
    .map(|i| vec![Value::Integer(i), Value::Text(format!("user {i}"))])
    .collect();

// 200_000 parameters: 7 statements of 14_285 rows and a final one of 5
let plan = insert.plan_for::<rusqlite::Connection>(rows.len())?;
assert_eq!(plan.sizes().collect::<Vec<_>>(), [14_285, 14_285, 14_285, 14_285, 14_285, 14_285, 14_285, 5]);

let result = insert.execute(&mut conn, &rows)?;
assert_eq!(result.rows_affected(), 100_000);
assert_eq!(result.batches(), 8);
# Ok::<(), Box<dyn std::error::Error>>(())
```
"#
)]
#![cfg_attr(
    not(feature = "rusqlite"),
    doc = "Enable the `rusqlite` feature for a runnable SQLite example."
)]
//!
//! ## Batching
//!
//! ```rust
//! use bulk_insert::BulkInsert;
//!
//! let insert = BulkInsert::new("INSERT INTO t (a, b, c) VALUES <values>", ["", "int", "text"])?
//!     .max_bind_vars(12);
//!
//! let plan = insert.plan(10)?;
//! assert_eq!(plan.sizes().collect::<Vec<_>>(), [3, 3, 3, 1]);
//! assert_eq!(
//!     insert.render(1),
//!     "INSERT INTO t (a, b, c) VALUES ($1, $2::int, $3::text)"
//! );
//! # Ok::<(), bulk_insert::error::ConfigError>(())
//! ```
//!
//! ## Database Support
//!
//! | Database   | Driver         | Feature Flag     | Status |
//! |------------|----------------|------------------|--------|
//! | SQLite     | rusqlite       | `rusqlite`       | ✅     |
//! | PostgreSQL | postgres       | `postgres-sync`  | ✅     |
//! | PostgreSQL | tokio-postgres | `tokio-postgres` | ✅     |

#![cfg_attr(docsrs, feature(doc_cfg))]

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for bulk insert operations
pub use bulk_insert_core::error::Result;

/// The insert descriptor and executor
pub use bulk_insert_core::BulkInsert;

/// Results reported per batch and in aggregate
pub use bulk_insert_core::{BatchResult, ExecutionResult};

/// Default bind parameter ceiling
pub use bulk_insert_core::MAX_BIND_VARS;

/// Error types
pub mod error {
    pub use bulk_insert_core::error::{ConfigError, InsertError};
}

/// Planning and rendering building blocks.
///
/// Useful to inspect what an insert will send without a database:
/// - `BatchPlan` / `Batch` - how rows are split
/// - `values_placeholders` - the `($1, $2::cast), ...` value list
/// - `flatten` - row-major argument list for a batch
pub mod core {
    pub use bulk_insert_core::bind::flatten;
    pub use bulk_insert_core::placeholder::{VALUES_MARKER, substitute, values_placeholders};
    pub use bulk_insert_core::plan::{Batch, BatchPlan};
}

/// Database handle capabilities.
///
/// Implement [`Connection`](connection::Connection) and
/// [`Statement`](connection::Statement) to run inserts through a driver that
/// is not supported out of the box.
pub mod connection {
    pub use bulk_insert_core::connection::{
        AsyncConnection, AsyncStatement, Connection, Statement,
    };
}

// =============================================================================
// Drivers
// =============================================================================

/// SQLite support through [`rusqlite`].
#[cfg(feature = "rusqlite")]
pub mod sqlite {
    pub use bulk_insert_core::driver::SQLITE_MAX_BIND_VARS;
    pub use bulk_insert_core::driver::rusqlite::RusqliteStatement;

    pub use ::rusqlite;
}

/// PostgreSQL support through [`postgres`] and [`tokio_postgres`].
#[cfg(any(feature = "postgres-sync", feature = "tokio-postgres"))]
pub mod postgres {
    pub use bulk_insert_core::driver::{POSTGRES_MAX_BIND_VARS, PostgresValue};

    #[cfg(feature = "postgres-sync")]
    pub mod sync {
        pub use bulk_insert_core::driver::postgres::PostgresStatement;

        pub use ::postgres;
    }

    #[cfg(feature = "tokio-postgres")]
    pub mod tokio {
        pub use bulk_insert_core::driver::tokio_postgres::TokioPostgresStatement;

        pub use ::tokio_postgres;
    }
}

/// Common imports.
pub mod prelude {
    pub use crate::connection::*;
    pub use crate::error::{ConfigError, InsertError};
    pub use crate::{BatchResult, BulkInsert, ExecutionResult, MAX_BIND_VARS};

    #[cfg(any(feature = "postgres-sync", feature = "tokio-postgres"))]
    pub use crate::postgres::PostgresValue;
}
