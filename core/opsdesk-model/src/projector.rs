use crate::{RawEntity, Row, TableSchema};
use opsdesk_types::{ResourceKind, RowId};

/// Turns server records into display rows for one screen.
///
/// Implementations must be pure: the same entity always yields the same row,
/// and nothing is fetched or stored while projecting. Missing sub-objects
/// resolve to defaults instead of failing.
pub trait RowProjector: Send + Sync {
    /// The listing this projector handles.
    fn resource(&self) -> ResourceKind;

    /// The screen's column table.
    fn schema(&self) -> TableSchema;

    /// Projects an entity whose identity is already known.
    fn project(&self, id: RowId, raw: &RawEntity) -> Row;

    /// Projects an entity, reading its identity from the payload.
    /// Returns `None` only for records without a usable `id`.
    fn project_entity(&self, raw: &RawEntity) -> Option<Row> {
        let id = raw.id()?;
        Some(self.project(id, raw))
    }

    /// Projects a whole listing, skipping records without an identity.
    fn project_all(&self, raws: &[RawEntity]) -> Vec<Row> {
        raws.iter().filter_map(|raw| self.project_entity(raw)).collect()
    }
}

/// Seeds a row with every top-level scalar of the entity, so fields the
/// projector does not know about still show up in search.
pub(crate) fn carry_scalars(id: RowId, raw: &RawEntity) -> Row {
    let mut row = Row::new(id);
    for (key, value) in raw.scalar_fields() {
        row.set(key.clone(), value.clone());
    }
    row
}
