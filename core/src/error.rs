use thiserror::Error;

use crate::result::ExecutionResult;

/// Errors raised while describing a bulk insert, before any statement is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The SQL template has no `<values>` marker
    #[error("SQL template is missing the `<values>` marker")]
    MissingMarker,

    /// The SQL template has more than one `<values>` marker
    #[error("SQL template must contain exactly one `<values>` marker, found {count}")]
    DuplicateMarker { count: usize },

    /// The cast list is empty, so there are no columns to insert
    #[error("insert must have at least one column")]
    NoColumns,

    /// A single row needs more bind parameters than one statement may carry
    #[error("{columns} columns cannot fit in a statement limited to {max_bind_vars} bind parameters")]
    TooManyColumns { columns: usize, max_bind_vars: usize },
}

/// Errors returned by [`BulkInsert::execute`](crate::BulkInsert::execute).
///
/// Driver failures are surfaced verbatim: the `Display` output of
/// [`Prepare`](InsertError::Prepare) and [`Execute`](InsertError::Execute) is
/// the driver error's own message, and the driver error is not repeated as
/// [`source`](core::error::Error::source). Every variant carries the result
/// accumulated before the failure, see [`InsertError::partial`].
#[derive(Debug, Error)]
pub enum InsertError<E> {
    /// The insert could not be planned
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A row does not have one value per column
    #[error("row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Error preparing the statement for a batch
    #[error("{error}")]
    Prepare {
        /// Zero-based index of the failing batch in the plan
        batch: usize,
        error: E,
        partial: ExecutionResult,
    },

    /// Error executing the statement for a batch
    #[error("{error}")]
    Execute {
        /// Zero-based index of the failing batch in the plan
        batch: usize,
        error: E,
        partial: ExecutionResult,
    },
}

impl<E> InsertError<E> {
    /// The result accumulated from batches that completed before the failure.
    ///
    /// Validation errors happen before any batch runs and report an empty result.
    pub fn partial(&self) -> ExecutionResult {
        match self {
            InsertError::Prepare { partial, .. } | InsertError::Execute { partial, .. } => {
                *partial
            }
            InsertError::Config(_) | InsertError::RowWidth { .. } => ExecutionResult::default(),
        }
    }

    /// Zero-based index of the batch that failed, if a batch was attempted.
    pub fn batch(&self) -> Option<usize> {
        match self {
            InsertError::Prepare { batch, .. } | InsertError::Execute { batch, .. } => {
                Some(*batch)
            }
            _ => None,
        }
    }

    /// Returns the driver error, discarding the partial result.
    pub fn into_driver_error(self) -> Option<E> {
        match self {
            InsertError::Prepare { error, .. } | InsertError::Execute { error, .. } => {
                Some(error)
            }
            _ => None,
        }
    }
}

/// Result type for bulk insert operations against a driver with error `E`
pub type Result<T, E> = core::result::Result<T, InsertError<E>>;
