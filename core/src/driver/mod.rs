//! Collaborator implementations for supported database drivers.
//!
//! | Database   | Driver         | Feature Flag     | Ceiling |
//! |------------|----------------|------------------|---------|
//! | SQLite     | rusqlite       | `rusqlite`       | 32766   |
//! | PostgreSQL | postgres       | `postgres-sync`  | 65535   |
//! | PostgreSQL | tokio-postgres | `tokio-postgres` | 65535   |

#[cfg(feature = "rusqlite")]
pub mod rusqlite;

#[cfg(feature = "postgres-sync")]
pub mod postgres;

#[cfg(feature = "tokio-postgres")]
pub mod tokio_postgres;

/// Maximum parameter count for SQLite (SQLITE_MAX_VARIABLE_NUMBER default).
pub const SQLITE_MAX_BIND_VARS: usize = 32766;

/// Maximum parameter count for PostgreSQL.
pub const POSTGRES_MAX_BIND_VARS: usize = 65535;

/// Owned value bound to one PostgreSQL placeholder.
#[cfg(any(feature = "postgres-sync", feature = "tokio-postgres"))]
pub type PostgresValue = Box<dyn postgres_types::ToSql + Sync>;
