//! Free-text search over rows.
//!
//! There is no allow-list of searchable columns: every field a projector puts
//! on a row is matched, so new fields become searchable without wiring.

use opsdesk_model::{coerce, Row};

/// Whether any field of `row` contains `query`, ignoring case.
/// The empty query matches every row.
pub fn matches(row: &Row, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    row.fields()
        .any(|(_, value)| coerce::display(value).to_lowercase().contains(&needle))
}

/// Rows matching `query`, in their original order.
pub fn filter_rows<'a, I>(rows: I, query: &str) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    if query.is_empty() {
        return rows.into_iter().collect();
    }
    rows.into_iter().filter(|row| matches(row, query)).collect()
}
