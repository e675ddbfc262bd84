//! Table-grid input.
//!
//! PDF table extraction hands over cell grids instead of free text.  Each
//! row is flattened into one line so it can be repaired and segmented
//! exactly like a text line.

/// Joins each row's non-blank cells with single spaces.
///
/// Rows with no content are skipped.
#[must_use]
pub fn rows_to_lines(rows: &[Vec<String>]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect()
}
