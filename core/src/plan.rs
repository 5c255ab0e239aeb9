//! Batch planning for INSERT statements.
//!
//! Databases cap the number of bind parameters in a single statement. A plan
//! splits the rows into equal regular batches followed by one final batch
//! holding the remainder, so that no statement goes over the ceiling.

use core::ops::Range;

use crate::error::ConfigError;

/// Default bind parameter ceiling (the PostgreSQL wire protocol limit).
pub const MAX_BIND_VARS: usize = 65535;

/// A contiguous range of input rows executed as one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    pub offset: usize,
    pub len: usize,
}

impl Batch {
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Row indices covered by this batch.
    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Partition of `rows` rows into `regular` batches of `batch_size` rows,
/// followed by one final batch of `leftover` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    batch_size: usize,
    regular: usize,
    leftover: usize,
}

impl BatchPlan {
    /// Plans `rows` rows of `columns` values each under `max_bind_vars`.
    ///
    /// Starts from `columns * rows / max_bind_vars` regular batches and sizes
    /// them so one more batch would fit the remainder. When integer division
    /// leaves a remainder larger than a regular batch, the excess is moved into
    /// additional regular batches until the final batch is no larger than the
    /// others.
    ///
    /// ```
    /// use bulk_insert_core::plan::BatchPlan;
    ///
    /// let plan = BatchPlan::new(10, 3, 12).unwrap();
    /// assert_eq!(plan.sizes().collect::<Vec<_>>(), [3, 3, 3, 1]);
    /// ```
    pub fn new(rows: usize, columns: usize, max_bind_vars: usize) -> Result<Self, ConfigError> {
        if columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if columns > max_bind_vars {
            return Err(ConfigError::TooManyColumns {
                columns,
                max_bind_vars,
            });
        }

        let mut batches = columns.saturating_mul(rows) / max_bind_vars;
        if batches == 0 {
            return Ok(Self {
                batch_size: rows,
                regular: 0,
                leftover: rows,
            });
        }

        // Only reachable when a single row uses the whole ceiling
        let batch_size = (rows / (batches + 1)).max(1);
        let mut leftover = rows - batch_size * batches;
        while leftover > batch_size {
            batches += 1;
            leftover -= batch_size;
        }

        Ok(Self {
            batch_size,
            regular: batches,
            leftover,
        })
    }

    /// Rows in each regular batch.
    #[inline]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of regular batches before the final one.
    #[inline]
    pub const fn regular_batches(&self) -> usize {
        self.regular
    }

    /// Rows in the final batch.
    #[inline]
    pub const fn leftover(&self) -> usize {
        self.leftover
    }

    /// Total number of batches, the final one included even when empty.
    #[inline]
    pub const fn len(&self) -> usize {
        self.regular + 1
    }

    /// Always false: a plan holds at least its final batch.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Total rows covered by the plan.
    #[inline]
    pub const fn rows(&self) -> usize {
        self.batch_size * self.regular + self.leftover
    }

    /// Batches in execution order.
    pub fn batches(&self) -> impl ExactSizeIterator<Item = Batch> + '_ {
        (0..self.len()).map(move |i| {
            if i < self.regular {
                Batch {
                    offset: i * self.batch_size,
                    len: self.batch_size,
                }
            } else {
                Batch {
                    offset: self.regular * self.batch_size,
                    len: self.leftover,
                }
            }
        })
    }

    /// Batch sizes in execution order.
    pub fn sizes(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.batches().map(|b| b.len)
    }
}
