//! Bringing the row cache back in line with the backend after a write.

use crate::error::ConsoleResult;
use crate::transport::ConsoleTransport;
use opsdesk_model::{RawEntity, RowProjector};
use opsdesk_table::RowCache;
use opsdesk_types::RowId;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// How a write was folded back into the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reconciliation {
    /// The returned entity replaced its row; nothing else was touched.
    PointUpdated { id: RowId },
    /// The whole listing was fetched again.
    Refetched { rows: usize },
    /// The listing could not be fetched; the cache still holds the rows it
    /// had before the write.
    RefetchFailed { reason: String },
}

impl Reconciliation {
    pub fn is_refetch(&self) -> bool {
        matches!(self, Self::Refetched { .. } | Self::RefetchFailed { .. })
    }
}

/// Folds committed writes back into a [`RowCache`].
///
/// Rows are swapped whole or not at all. A returned entity whose row is in
/// the cache is projected and swapped in place; anything else (no entity, an
/// entity without identity, one the cache has never seen, one from another
/// listing) falls back to a full refetch.
pub struct MutationReconciler {
    transport: Arc<dyn ConsoleTransport>,
    projector: Arc<dyn RowProjector>,
}

impl MutationReconciler {
    pub fn new(transport: Arc<dyn ConsoleTransport>, projector: Arc<dyn RowProjector>) -> Self {
        Self {
            transport,
            projector,
        }
    }

    pub fn projector(&self) -> &Arc<dyn RowProjector> {
        &self.projector
    }

    /// Applies the outcome of a successful write to `cache`.
    pub async fn reconcile(
        &self,
        entity: Option<&RawEntity>,
        cache: &RwLock<RowCache>,
    ) -> Reconciliation {
        if let Some(entity) = entity {
            let applied = self.apply_entity(entity, &mut *cache.write().await);
            if let Some(id) = applied {
                return Reconciliation::PointUpdated { id };
            }
            debug!("Returned entity cannot be applied in place, refetching");
        }

        match self.refetch(cache).await {
            Ok(rows) => Reconciliation::Refetched { rows },
            Err(err) => {
                warn!("Refetch after write failed: {err}");
                Reconciliation::RefetchFailed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Swaps the row of `entity` into the cache. Returns its identity, or
    /// `None` (cache untouched) when the entity cannot be applied in place.
    pub fn apply_entity(&self, entity: &RawEntity, cache: &mut RowCache) -> Option<RowId> {
        if entity.kind != self.projector.resource() {
            return None;
        }
        let row = self.projector.project_entity(entity)?;
        let id = row.id().clone();
        if !cache.replace_row(row) {
            return None;
        }
        debug!("Row {id} reconciled in place");
        Some(id)
    }

    /// Fetches and projects the whole listing, then replaces the cache.
    /// On failure the cache is left as it was.
    pub async fn refetch(&self, cache: &RwLock<RowCache>) -> ConsoleResult<usize> {
        let resource = self.projector.resource();
        let raws = self.transport.fetch_all(resource).await?;
        let rows = self.projector.project_all(&raws);
        let count = rows.len();
        cache.write().await.replace_all(rows);
        info!("Fetched {count} {resource} rows");
        Ok(count)
    }
}
