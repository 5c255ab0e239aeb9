//! Database handle capabilities required by the executor.
//!
//! A driver only has to prepare a statement from SQL text and execute a
//! prepared statement with a flat list of positional arguments. Statements are
//! released when dropped; the executor drops each one before starting the next
//! batch, on success and on failure.

use crate::plan::MAX_BIND_VARS;
use crate::result::BatchResult;

/// A blocking database handle that can prepare statements.
pub trait Connection {
    /// Driver-level scalar value bound to one placeholder
    type Value;
    /// Driver error, returned to the caller unchanged
    type Error;
    /// Prepared statement borrowing the connection for the duration of a batch
    type Statement<'c>: Statement<Value = Self::Value, Error = Self::Error>
    where
        Self: 'c;

    /// Bind parameter ceiling used when the insert does not override it.
    const MAX_BIND_VARS: usize = MAX_BIND_VARS;

    fn prepare(&mut self, sql: &str) -> Result<Self::Statement<'_>, Self::Error>;
}

/// A prepared statement, released on drop.
pub trait Statement {
    type Value;
    type Error;

    /// Executes with `args` bound to `$1..$n` in order.
    fn execute(&mut self, args: &[&Self::Value]) -> Result<BatchResult, Self::Error>;
}

/// Async counterpart of [`Connection`].
///
/// The executor still awaits each batch before starting the next one.
pub trait AsyncConnection {
    type Value;
    type Error;
    type Statement<'c>: AsyncStatement<Value = Self::Value, Error = Self::Error>
    where
        Self: 'c;

    const MAX_BIND_VARS: usize = MAX_BIND_VARS;

    fn prepare(
        &mut self,
        sql: &str,
    ) -> impl Future<Output = Result<Self::Statement<'_>, Self::Error>>;
}

/// Async counterpart of [`Statement`].
pub trait AsyncStatement {
    type Value;
    type Error;

    fn execute(
        &mut self,
        args: &[&Self::Value],
    ) -> impl Future<Output = Result<BatchResult, Self::Error>>;
}
