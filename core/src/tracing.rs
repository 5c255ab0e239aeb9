//! Tracing utilities for bulk insert observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site.

/// Emit a debug-level event describing a freshly computed plan.
///
/// ```ignore
/// bulk_trace_plan!(rows.len(), plan);
/// ```
#[macro_export]
macro_rules! bulk_trace_plan {
    ($rows:expr, $plan:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(
            rows = $rows,
            batches = $plan.len(),
            batch_size = $plan.batch_size(),
            leftover = $plan.leftover(),
            "bulk_insert.plan"
        );
    };
}

/// Emit a debug-level event with the SQL text and parameter count of one batch.
///
/// ```ignore
/// bulk_trace_batch!(index, rows.len(), args.len(), &sql);
/// ```
#[macro_export]
macro_rules! bulk_trace_batch {
    ($batch:expr, $rows:expr, $params:expr, $sql:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(
            batch = $batch,
            rows = $rows,
            params = $params,
            sql = %$sql,
            "bulk_insert.batch"
        );
    };
}

/// Emit a warn-level event when a batch fails to prepare or execute.
///
/// ```ignore
/// bulk_trace_failure!("prepare", index, partial.rows_affected());
/// ```
#[macro_export]
macro_rules! bulk_trace_failure {
    ($stage:literal, $batch:expr, $completed_rows:expr) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(
            stage = $stage,
            batch = $batch,
            completed_rows = $completed_rows,
            "bulk_insert.failed"
        );
    };
}
