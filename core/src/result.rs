//! Per-batch and aggregated execution results.

/// What the driver reported after executing one batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchResult {
    pub rows_affected: u64,
    /// Generated identifier, when the driver reports one (e.g. SQLite rowid)
    pub last_insert_id: Option<i64>,
}

impl BatchResult {
    pub const fn new(rows_affected: u64, last_insert_id: Option<i64>) -> Self {
        Self {
            rows_affected,
            last_insert_id,
        }
    }
}

/// Running total of every batch executed so far.
///
/// Values are folded with [`ExecutionResult::add`]; the executor threads the
/// aggregate through its loop and hands it back on success and on failure.
///
/// ```
/// use bulk_insert_core::{BatchResult, ExecutionResult};
///
/// let total = [BatchResult::new(3, Some(3)), BatchResult::new(2, Some(5))]
///     .into_iter()
///     .fold(ExecutionResult::default(), ExecutionResult::add);
///
/// assert_eq!(total.rows_affected(), 5);
/// assert_eq!(total.last_insert_id(), Some(5));
/// assert_eq!(total.batches(), 2);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    rows_affected: u64,
    last_insert_id: Option<i64>,
    batches: usize,
}

impl ExecutionResult {
    /// Folds one batch into the total.
    ///
    /// Rows affected are summed. The identifier is replaced by the batch's
    /// value, so the aggregate always reports what the latest batch reported.
    #[must_use]
    pub const fn add(self, batch: BatchResult) -> Self {
        Self {
            rows_affected: self.rows_affected + batch.rows_affected,
            last_insert_id: batch.last_insert_id,
            batches: self.batches + 1,
        }
    }

    /// Total rows affected across executed batches.
    #[inline]
    pub const fn rows_affected(&self) -> u64 {
        self.rows_affected
    }

    /// Identifier reported by the most recently executed batch.
    #[inline]
    pub const fn last_insert_id(&self) -> Option<i64> {
        self.last_insert_id
    }

    /// Number of batches that executed successfully.
    #[inline]
    pub const fn batches(&self) -> usize {
        self.batches
    }
}

impl core::ops::Add<BatchResult> for ExecutionResult {
    type Output = ExecutionResult;

    fn add(self, batch: BatchResult) -> Self::Output {
        ExecutionResult::add(self, batch)
    }
}
