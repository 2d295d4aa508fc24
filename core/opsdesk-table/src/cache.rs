//! The session's row cache.

use opsdesk_model::Row;
use opsdesk_types::RowId;
use std::collections::HashMap;
use tracing::debug;

/// Rows in listing order, one per identity.
///
/// Only two writes exist: [`RowCache::replace_all`] after a full fetch and
/// [`RowCache::replace_row`] after a point reconciliation. Both swap whole
/// rows; a row is never edited field by field.
#[derive(Debug, Clone, Default)]
pub struct RowCache {
    rows: Vec<Row>,
    /// Position of each identity in `rows`.
    index: HashMap<RowId, usize>,
    /// Bumped on every write.
    generation: u64,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cache from a projected listing.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut cache = Self::new();
        cache.replace_all(rows);
        cache
    }

    /// Replaces every row. When the listing repeats an identity, the later
    /// row wins and keeps the earlier position.
    pub fn replace_all(&mut self, rows: Vec<Row>) {
        self.rows.clear();
        self.index.clear();
        for row in rows {
            match self.index.get(row.id()) {
                Some(&pos) => self.rows[pos] = row,
                None => {
                    self.index.insert(row.id().clone(), self.rows.len());
                    self.rows.push(row);
                }
            }
        }
        self.generation += 1;
        debug!("Row cache replaced: {} rows", self.rows.len());
    }

    /// Swaps in the row with the same identity. Returns `false`, leaving the
    /// cache untouched, when no such row is cached.
    pub fn replace_row(&mut self, row: Row) -> bool {
        let Some(&pos) = self.index.get(row.id()) else {
            return false;
        };
        self.rows[pos] = row;
        self.generation += 1;
        true
    }

    pub fn get(&self, id: &RowId) -> Option<&Row> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.index.contains_key(id)
    }

    /// Rows in listing order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write counter; changes whenever any row does.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether any cached row has a field named `key`.
    pub fn has_field(&self, key: &str) -> bool {
        self.rows.iter().any(|row| row.get(key).is_some())
    }
}
