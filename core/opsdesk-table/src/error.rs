//! Error types for the table engine.

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised when table state would break an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Sort key names no column of the table and no field of its rows.
    #[error("unknown sort column: {0}")]
    UnknownColumn(String),

    /// Page size must be positive.
    #[error("invalid page size: {0}")]
    InvalidPageSize(usize),
}
