//! Core of bulk-insert: batch planning, placeholder rendering, execution and
//! result aggregation for multi-row INSERT statements.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod bind;
pub mod connection;
pub mod driver;
pub mod error;
pub mod insert;
pub mod placeholder;
pub mod plan;
pub mod profiling;
pub mod result;
pub mod tracing;

// Re-export key types and traits
pub use connection::{AsyncConnection, AsyncStatement, Connection, Statement};
pub use error::{ConfigError, InsertError, Result};
pub use insert::BulkInsert;
pub use placeholder::{VALUES_MARKER, values_placeholders};
pub use plan::{Batch, BatchPlan, MAX_BIND_VARS};
pub use result::{BatchResult, ExecutionResult};
