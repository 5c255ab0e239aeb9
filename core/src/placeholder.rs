use alloc::string::String;
use core::fmt::Write;

/// Marker replaced in the SQL template by the generated value list.
pub const VALUES_MARKER: &str = "<values>";

/// Separator between row groups in a rendered value list.
const ROW_SEPARATOR: &str = ",\n";

/// Renders the value list for a batch of `rows` rows.
///
/// Each row becomes one parenthesized group of PostgreSQL-style positional
/// placeholders. Numbering is row-major and starts at `$1`, since every batch
/// is prepared as its own statement. A column whose cast is non-empty gets a
/// `::cast` suffix.
///
/// ```
/// use bulk_insert_core::placeholder::values_placeholders;
///
/// let casts = ["", "int"];
/// assert_eq!(values_placeholders(2, &casts), "($1, $2::int),\n($3, $4::int)");
/// ```
pub fn values_placeholders<S: AsRef<str>>(rows: usize, casts: &[S]) -> String {
    crate::bulk_profile_scope!("bulk_insert", "placeholders");

    let columns = casts.len();
    let mut out = String::with_capacity(estimate_len(rows, casts));

    for row in 0..rows {
        if row > 0 {
            out.push_str(ROW_SEPARATOR);
        }
        out.push('(');
        for (col, cast) in casts.iter().enumerate() {
            if col > 0 {
                out.push_str(", ");
            }
            let index = row * columns + col + 1;
            let cast = cast.as_ref();
            // Writing into a String cannot fail
            let _ = if cast.is_empty() {
                write!(out, "${index}")
            } else {
                write!(out, "${index}::{cast}")
            };
        }
        out.push(')');
    }

    out
}

/// Substitutes `values` for the first `<values>` marker in `template`.
pub fn substitute(template: &str, values: &str) -> String {
    template.replacen(VALUES_MARKER, values, 1)
}

fn estimate_len<S: AsRef<str>>(rows: usize, casts: &[S]) -> usize {
    // "$" + digits + ", " per column, "(" + ")" + ",\n" per row
    let digits = (rows * casts.len()).max(1).ilog10() as usize + 1;
    let casts_len: usize = casts
        .iter()
        .map(|c| match c.as_ref().len() {
            0 => 0,
            n => n + 2,
        })
        .sum();
    rows * (casts.len() * (digits + 3) + casts_len + 4)
}
