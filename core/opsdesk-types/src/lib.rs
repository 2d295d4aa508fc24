//! Core type definitions for opsdesk.
//!
//! This crate defines the small, screen-agnostic types shared by the rest of
//! the console engine:
//! - Row identities as assigned by the backend
//! - Monotonic request tokens used to order preview responses
//! - The adjustable field families, resource kinds and commit operations
//!
//! Display rules, column tables and wire payloads live in `opsdesk-model`
//! and `opsdesk-sync`, not here.

mod ids;
mod operation;

pub use ids::{RequestToken, RowId, TokenSource};
pub use operation::{FieldFamily, OperationKind, ResourceKind};

pub type Result<T> = std::result::Result<T, Error>;

/// Text that does not name a known identity, family or listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid row id: {0}")]
    InvalidRowId(String),

    #[error("unknown field family: {0}")]
    UnknownFamily(String),

    #[error("unknown resource kind: {0}")]
    UnknownResource(String),
}
