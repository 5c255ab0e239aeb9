//! Flattening of row batches into positional argument lists.

use alloc::vec::Vec;

/// Borrows every value of `rows` in row-major order.
///
/// The output lines up with [`values_placeholders`](crate::placeholder::values_placeholders):
/// argument `k` (0-based) binds to placeholder `$k+1`.
///
/// ```
/// use bulk_insert_core::bind::flatten;
///
/// let rows = [vec![1, 2], vec![3, 4]];
/// assert_eq!(flatten(&rows), [&1, &2, &3, &4]);
/// ```
pub fn flatten<R, V>(rows: &[R]) -> Vec<&V>
where
    R: AsRef<[V]>,
{
    let len = rows.iter().map(|row| row.as_ref().len()).sum();
    let mut args = Vec::with_capacity(len);
    for row in rows {
        args.extend(row.as_ref());
    }
    args
}

/// Index and width of the first row whose width differs from `columns`.
pub fn find_misshapen_row<R, V>(rows: &[R], columns: usize) -> Option<(usize, usize)>
where
    R: AsRef<[V]>,
{
    rows.iter()
        .map(|row| row.as_ref().len())
        .enumerate()
        .find(|&(_, width)| width != columns)
}
