//! Row model for opsdesk.
//!
//! Defines the types every console screen is built from:
//! - [`RawEntity`]: a server record exactly as received (id, kind, JSON payload)
//! - [`Row`]: the flat, display-ready projection of one entity
//! - [`TableSchema`]: a screen's column table with one coercion rule per column
//! - [`RowProjector`]: turns raw entities into rows; one implementation per screen
//!
//! Projection is pure: projectors never touch the network or any storage, so
//! they can be re-run over a whole listing on every refresh.

pub mod coerce;
mod entity;
mod packages;
mod projector;
mod row;
mod schema;
mod users;

pub use entity::RawEntity;
pub use packages::PackageProjector;
pub use projector::RowProjector;
pub use row::Row;
pub use schema::{ColumnDef, ColumnType, TableSchema};
pub use users::UserProjector;
