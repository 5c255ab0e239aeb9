//! Batched multi-row INSERT execution.

use alloc::string::String;
use alloc::vec::Vec;

use crate::bind;
use crate::connection::{AsyncConnection, AsyncStatement, Connection, Statement};
use crate::error::{ConfigError, InsertError, Result};
use crate::placeholder::{VALUES_MARKER, substitute, values_placeholders};
use crate::plan::{BatchPlan, MAX_BIND_VARS};
use crate::result::ExecutionResult;

/// A multi-row INSERT split into as many statements as the bind parameter
/// ceiling requires.
///
/// The SQL template must contain the `<values>` marker exactly once. Each
/// batch replaces it with a value list numbered from `$1`. `casts` holds one
/// entry per inserted column; an empty string means no cast.
///
/// ```
/// use bulk_insert_core::BulkInsert;
///
/// let insert = BulkInsert::new(
///     "INSERT INTO users (id, name, created) VALUES <values>",
///     ["", "", "timestamptz"],
/// )?;
///
/// assert_eq!(insert.columns(), 3);
/// assert_eq!(
///     insert.render(2),
///     "INSERT INTO users (id, name, created) VALUES ($1, $2, $3::timestamptz),\n($4, $5, $6::timestamptz)"
/// );
/// # Ok::<(), bulk_insert_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkInsert {
    sql: String,
    casts: Vec<String>,
    max_bind_vars: Option<usize>,
}

impl BulkInsert {
    /// Creates an insert from a SQL template and per-column casts.
    pub fn new<I, S>(sql: impl Into<String>, casts: I) -> core::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sql = sql.into();
        match sql.matches(VALUES_MARKER).count() {
            0 => return Err(ConfigError::MissingMarker),
            1 => {}
            count => return Err(ConfigError::DuplicateMarker { count }),
        }

        let casts: Vec<String> = casts.into_iter().map(Into::into).collect();
        if casts.is_empty() {
            return Err(ConfigError::NoColumns);
        }

        Ok(Self {
            sql,
            casts,
            max_bind_vars: None,
        })
    }

    /// Overrides the bind parameter ceiling of the connection.
    pub fn max_bind_vars(mut self, limit: usize) -> Self {
        assert!(limit > 0, "max_bind_vars must be > 0");
        self.max_bind_vars = Some(limit);
        self
    }

    /// Number of inserted columns, i.e. the number of casts.
    #[inline]
    pub fn columns(&self) -> usize {
        self.casts.len()
    }

    #[inline]
    pub fn casts(&self) -> &[String] {
        &self.casts
    }

    /// The SQL template, marker included.
    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Renders the statement for a batch of `rows` rows.
    pub fn render(&self, rows: usize) -> String {
        substitute(&self.sql, &values_placeholders(rows, &self.casts))
    }

    /// Plans `rows` rows under the overridden ceiling, or [`MAX_BIND_VARS`].
    ///
    /// This is the plan for a connection using the default ceiling. Use
    /// [`plan_for`](Self::plan_for) to see what a given driver will run.
    pub fn plan(&self, rows: usize) -> core::result::Result<BatchPlan, ConfigError> {
        self.plan_with_default(rows, MAX_BIND_VARS)
    }

    /// The plan [`execute`](Self::execute) runs on a connection of type `C`.
    ///
    /// An empty final batch is listed here but never sent.
    ///
    /// ```
    /// use bulk_insert_core::{BulkInsert, Connection};
    /// # use bulk_insert_core::{BatchResult, Statement};
    /// # struct Small;
    /// # impl Statement for Small {
    /// #     type Value = i64;
    /// #     type Error = std::fmt::Error;
    /// #     fn execute(&mut self, _: &[&i64]) -> Result<BatchResult, std::fmt::Error> {
    /// #         Ok(BatchResult::default())
    /// #     }
    /// # }
    /// # impl Connection for Small {
    /// #     type Value = i64;
    /// #     type Error = std::fmt::Error;
    /// #     type Statement<'c> = Small;
    /// #     const MAX_BIND_VARS: usize = 12;
    /// #     fn prepare(&mut self, _: &str) -> Result<Small, std::fmt::Error> {
    /// #         Ok(Small)
    /// #     }
    /// # }
    ///
    /// // `Small` is a connection with a ceiling of 12 bind parameters
    /// let insert = BulkInsert::new("INSERT INTO t (a, b, c) VALUES <values>", ["", "", ""])?;
    /// assert_eq!(insert.plan_for::<Small>(10)?.len(), 4);
    /// assert_eq!(insert.plan(10)?.len(), 1);
    /// # Ok::<(), bulk_insert_core::ConfigError>(())
    /// ```
    pub fn plan_for<C: Connection>(
        &self,
        rows: usize,
    ) -> core::result::Result<BatchPlan, ConfigError> {
        self.plan_with_default(rows, C::MAX_BIND_VARS)
    }

    /// The plan [`execute_async`](Self::execute_async) runs on a connection of
    /// type `C`.
    pub fn plan_for_async<C: AsyncConnection>(
        &self,
        rows: usize,
    ) -> core::result::Result<BatchPlan, ConfigError> {
        self.plan_with_default(rows, C::MAX_BIND_VARS)
    }

    fn plan_with_default(
        &self,
        rows: usize,
        default_max: usize,
    ) -> core::result::Result<BatchPlan, ConfigError> {
        BatchPlan::new(
            rows,
            self.columns(),
            self.max_bind_vars.unwrap_or(default_max),
        )
    }

    fn checked_plan<R, V, E>(&self, rows: &[R], default_max: usize) -> Result<BatchPlan, E>
    where
        R: AsRef<[V]>,
    {
        if let Some((row, found)) = bind::find_misshapen_row(rows, self.columns()) {
            return Err(InsertError::RowWidth {
                row,
                expected: self.columns(),
                found,
            });
        }

        let plan = self.plan_with_default(rows.len(), default_max)?;
        crate::bulk_trace_plan!(rows.len(), plan);
        Ok(plan)
    }

    /// Inserts `rows` through `conn`, one prepared statement per batch.
    ///
    /// Batches run in order and the first failure stops the insert. The
    /// returned error carries the result of every batch that completed, see
    /// [`InsertError::partial`]. Empty batches are skipped, so inserting no
    /// rows sends nothing to the database.
    pub fn execute<C, R>(&self, conn: &mut C, rows: &[R]) -> Result<ExecutionResult, C::Error>
    where
        C: Connection,
        R: AsRef<[C::Value]>,
    {
        crate::bulk_profile_scope!("bulk_insert", "execute");

        let plan = self.checked_plan::<R, C::Value, C::Error>(rows, C::MAX_BIND_VARS)?;
        plan.batches()
            .enumerate()
            .filter(|(_, batch)| !batch.is_empty())
            .try_fold(ExecutionResult::default(), |result, (index, batch)| {
                self.execute_batch(conn, index, &rows[batch.range()], result)
            })
    }

    fn execute_batch<C, R>(
        &self,
        conn: &mut C,
        index: usize,
        rows: &[R],
        result: ExecutionResult,
    ) -> Result<ExecutionResult, C::Error>
    where
        C: Connection,
        R: AsRef<[C::Value]>,
    {
        let sql = self.render(rows.len());
        crate::bulk_trace_batch!(index, rows.len(), rows.len() * self.columns(), sql);

        let mut statement = match conn.prepare(&sql) {
            Ok(statement) => statement,
            Err(error) => {
                crate::bulk_trace_failure!("prepare", index, result.rows_affected());
                return Err(InsertError::Prepare {
                    batch: index,
                    error,
                    partial: result,
                });
            }
        };

        let args = bind::flatten(rows);
        match statement.execute(&args) {
            Ok(outcome) => Ok(result.add(outcome)),
            Err(error) => {
                crate::bulk_trace_failure!("execute", index, result.rows_affected());
                Err(InsertError::Execute {
                    batch: index,
                    error,
                    partial: result,
                })
            }
        }
    }

    /// Async version of [`execute`](Self::execute).
    ///
    /// Batches are still executed one at a time: each statement is awaited
    /// and dropped before the next one is prepared.
    pub async fn execute_async<C, R>(
        &self,
        conn: &mut C,
        rows: &[R],
    ) -> Result<ExecutionResult, C::Error>
    where
        C: AsyncConnection,
        R: AsRef<[C::Value]>,
    {
        // Profiler scopes are !Send and must not be held across an await
        let plan = {
            crate::bulk_profile_scope!("bulk_insert", "execute_async");
            self.checked_plan::<R, C::Value, C::Error>(rows, C::MAX_BIND_VARS)?
        };
        let mut result = ExecutionResult::default();

        for (index, batch) in plan.batches().enumerate() {
            if batch.is_empty() {
                continue;
            }
            let rows = &rows[batch.range()];
            let sql = self.render(rows.len());
            crate::bulk_trace_batch!(index, rows.len(), rows.len() * self.columns(), sql);

            let mut statement = match conn.prepare(&sql).await {
                Ok(statement) => statement,
                Err(error) => {
                    crate::bulk_trace_failure!("prepare", index, result.rows_affected());
                    return Err(InsertError::Prepare {
                        batch: index,
                        error,
                        partial: result,
                    });
                }
            };

            let args = bind::flatten(rows);
            match statement.execute(&args).await {
                Ok(outcome) => result = result.add(outcome),
                Err(error) => {
                    crate::bulk_trace_failure!("execute", index, result.rows_affected());
                    return Err(InsertError::Execute {
                        batch: index,
                        error,
                        partial: result,
                    });
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::BatchResult;
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct MockError(&'static str);

    impl fmt::Display for MockError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for MockError {}

    /// Records every prepared statement and bound argument list.
    #[derive(Debug, Default)]
    struct MockConnection {
        columns: usize,
        prepared: Vec<String>,
        executed: Vec<Vec<i64>>,
        released: usize,
        fail_prepare_at: Option<usize>,
        fail_execute_at: Option<usize>,
        next_id: i64,
    }

    impl MockConnection {
        fn new(columns: usize) -> Self {
            Self {
                columns,
                ..Default::default()
            }
        }
    }

    struct MockStatement<'c> {
        conn: &'c mut MockConnection,
        batch: usize,
    }

    impl Connection for MockConnection {
        type Value = i64;
        type Error = MockError;
        type Statement<'c> = MockStatement<'c>;

        const MAX_BIND_VARS: usize = 12;

        fn prepare(&mut self, sql: &str) -> core::result::Result<MockStatement<'_>, MockError> {
            let batch = self.prepared.len();
            self.prepared.push(sql.to_owned());
            if self.fail_prepare_at == Some(batch) {
                return Err(MockError("syntax error at or near \"VALUES\""));
            }
            Ok(MockStatement { conn: self, batch })
        }
    }

    impl Statement for MockStatement<'_> {
        type Value = i64;
        type Error = MockError;

        fn execute(&mut self, args: &[&i64]) -> core::result::Result<BatchResult, MockError> {
            if self.conn.fail_execute_at == Some(self.batch) {
                return Err(MockError("duplicate key value violates unique constraint"));
            }
            self.conn.executed.push(args.iter().map(|v| **v).collect());
            let rows = (args.len() / self.conn.columns) as u64;
            self.conn.next_id += rows as i64;
            Ok(BatchResult::new(rows, Some(self.conn.next_id)))
        }
    }

    impl Drop for MockStatement<'_> {
        fn drop(&mut self) {
            self.conn.released += 1;
        }
    }

    fn rows(count: i64, columns: i64) -> Vec<Vec<i64>> {
        (0..count)
            .map(|r| (0..columns).map(|c| r * columns + c).collect())
            .collect()
    }

    fn insert() -> BulkInsert {
        BulkInsert::new("INSERT INTO t (a, b, c) VALUES <values>", ["", "int", "text"]).unwrap()
    }

    #[test]
    fn splits_ten_rows_under_twelve_params() {
        let mut conn = MockConnection::new(3);
        let data = rows(10, 3);

        let result = insert().execute(&mut conn, &data).unwrap();

        assert_eq!(result.rows_affected(), 10);
        assert_eq!(result.batches(), 4);
        assert_eq!(result.last_insert_id(), Some(10));
        assert_eq!(conn.prepared.len(), 4);
        assert_eq!(conn.released, 4);
        assert_eq!(
            conn.prepared[0],
            "INSERT INTO t (a, b, c) VALUES ($1, $2::int, $3::text),\n($4, $5::int, $6::text),\n($7, $8::int, $9::text)"
        );
        assert_eq!(
            conn.prepared[3],
            "INSERT INTO t (a, b, c) VALUES ($1, $2::int, $3::text)"
        );

        let sizes: Vec<usize> = conn.executed.iter().map(Vec::len).collect();
        assert_eq!(sizes, [9, 9, 9, 3]);
        let flat: Vec<i64> = conn.executed.concat();
        assert_eq!(flat, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn zero_rows_is_a_no_op() {
        let insert = BulkInsert::new("INSERT INTO t (a) VALUES <values>", [""]).unwrap();
        let mut conn = MockConnection::new(1);
        let data: Vec<Vec<i64>> = Vec::new();

        let result = insert.execute(&mut conn, &data).unwrap();

        assert_eq!(result, ExecutionResult::default());
        assert!(conn.prepared.is_empty());
    }

    #[test]
    fn execute_failure_returns_partial_result() {
        let mut conn = MockConnection::new(3);
        conn.fail_execute_at = Some(2);
        let data = rows(10, 3);

        let err = insert().execute(&mut conn, &data).unwrap_err();

        assert!(matches!(err, InsertError::Execute { batch: 2, .. }));
        assert_eq!(err.partial().rows_affected(), 6);
        assert_eq!(err.partial().batches(), 2);
        assert_eq!(err.to_string(), "duplicate key value violates unique constraint");
        // Nothing after the failing batch was prepared
        assert_eq!(conn.prepared.len(), 3);
        assert_eq!(conn.executed.len(), 2);
        assert_eq!(conn.released, 3);
    }

    #[test]
    fn prepare_failure_returns_partial_result() {
        let mut conn = MockConnection::new(3);
        conn.fail_prepare_at = Some(1);
        let data = rows(10, 3);

        let err = insert().execute(&mut conn, &data).unwrap_err();

        assert_eq!(err.batch(), Some(1));
        assert_eq!(err.partial().rows_affected(), 3);
        assert_eq!(
            err.into_driver_error(),
            Some(MockError("syntax error at or near \"VALUES\""))
        );
        assert_eq!(conn.prepared.len(), 2);
        assert_eq!(conn.released, 1);
    }

    #[test]
    fn failure_at_each_batch_keeps_earlier_batches() {
        for k in 0..4 {
            let mut conn = MockConnection::new(3);
            conn.fail_execute_at = Some(k);
            let data = rows(10, 3);

            let err = insert().execute(&mut conn, &data).unwrap_err();

            assert_eq!(err.partial().batches(), k);
            assert_eq!(err.partial().rows_affected(), 3 * k as u64);
            assert_eq!(conn.executed.len(), k);
            assert_eq!(conn.prepared.len(), k + 1);
        }
    }

    #[test]
    fn plan_for_matches_executed_batches() {
        let data = rows(10, 3);
        let plan = insert().plan_for::<MockConnection>(data.len()).unwrap();
        assert_eq!(plan.sizes().collect::<Vec<_>>(), [3, 3, 3, 1]);
        // The connection-agnostic plan uses the protocol ceiling instead
        assert_eq!(insert().plan(data.len()).unwrap().len(), 1);

        let mut conn = MockConnection::new(3);
        let result = insert().execute(&mut conn, &data).unwrap();

        assert_eq!(result.batches(), plan.len());
        let sizes: Vec<usize> = conn.executed.iter().map(|args| args.len() / 3).collect();
        assert_eq!(sizes, plan.sizes().collect::<Vec<_>>());
    }

    #[test]
    fn driver_error_is_displayed_once() {
        use std::error::Error as _;

        let mut conn = MockConnection::new(3);
        conn.fail_execute_at = Some(0);

        let err = insert().execute(&mut conn, &rows(2, 3)).unwrap_err();

        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "duplicate key value violates unique constraint");
    }

    #[test]
    fn rejects_misshapen_rows_before_preparing() {
        let mut conn = MockConnection::new(3);
        let mut data = rows(5, 3);
        data[3].pop();

        let err = insert().execute(&mut conn, &data).unwrap_err();

        assert!(matches!(
            err,
            InsertError::RowWidth {
                row: 3,
                expected: 3,
                found: 2
            }
        ));
        assert_eq!(err.partial(), ExecutionResult::default());
        assert!(conn.prepared.is_empty());
    }

    #[test]
    fn override_beats_connection_default() {
        let mut conn = MockConnection::new(3);
        let data = rows(10, 3);

        let result = insert()
            .max_bind_vars(65535)
            .execute(&mut conn, &data)
            .unwrap();

        assert_eq!(result.batches(), 1);
        assert_eq!(conn.prepared.len(), 1);
        assert_eq!(conn.executed[0].len(), 30);
    }

    #[test]
    fn one_row_per_statement_when_row_fills_ceiling() {
        let insert = BulkInsert::new("INSERT INTO t (a, b) VALUES <values>", ["", ""])
            .unwrap()
            .max_bind_vars(2);
        let mut conn = MockConnection::new(2);
        let data = rows(3, 2);

        let result = insert.execute(&mut conn, &data).unwrap();

        // Plan ends with an empty batch which is never prepared
        assert_eq!(insert.plan(3).unwrap().len(), 4);
        assert_eq!(result.batches(), 3);
        assert_eq!(conn.prepared.len(), 3);
        assert!(conn.prepared.iter().all(|sql| sql.ends_with("($1, $2)")));
    }

    #[test]
    fn rejects_rows_wider_than_ceiling() {
        let mut conn = MockConnection::new(3);
        let data = rows(1, 3);

        let err = insert()
            .max_bind_vars(2)
            .execute(&mut conn, &data)
            .unwrap_err();

        assert!(matches!(
            err,
            InsertError::Config(ConfigError::TooManyColumns {
                columns: 3,
                max_bind_vars: 2
            })
        ));
    }

    #[test]
    fn validates_template_and_casts() {
        assert_eq!(
            BulkInsert::new("INSERT INTO t (a) VALUES ($1)", [""]),
            Err(ConfigError::MissingMarker)
        );
        assert_eq!(
            BulkInsert::new("INSERT INTO t (a) VALUES <values>, <values>", [""]),
            Err(ConfigError::DuplicateMarker { count: 2 })
        );
        assert_eq!(
            BulkInsert::new("INSERT INTO t (a) VALUES <values>", Vec::<String>::new()),
            Err(ConfigError::NoColumns)
        );
    }

    #[test]
    fn template_text_outside_marker_is_untouched() {
        let insert = BulkInsert::new(
            "INSERT INTO t (a) VALUES <values> ON CONFLICT (a) DO NOTHING",
            ["bigint"],
        )
        .unwrap();
        assert_eq!(
            insert.render(2),
            "INSERT INTO t (a) VALUES ($1::bigint),\n($2::bigint) ON CONFLICT (a) DO NOTHING"
        );
    }

    #[test]
    #[should_panic(expected = "max_bind_vars must be > 0")]
    fn zero_ceiling_panics() {
        let _ = insert().max_bind_vars(0);
    }
}
