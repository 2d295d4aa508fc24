//! The stateful component behind one console table screen.

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::preview::{PreviewPhase, PreviewSynchronizer};
use crate::protocol::{CommitRequest, PreviewResult};
use crate::reconcile::{MutationReconciler, Reconciliation};
use crate::transport::ConsoleTransport;
use crate::validation::{RequiredFields, Validator};
use opsdesk_model::{Row, RowProjector};
use opsdesk_table::{PageWindow, RowCache, SortConfig, TableError, TableView, VisiblePage};
use opsdesk_types::{FieldFamily, OperationKind, ResourceKind, RowId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub operation: OperationKind,
    /// Success text from the backend.
    pub message: Option<String>,
    pub reconciliation: Reconciliation,
}

/// A table screen: row cache, filter/sort/page state, an optional open
/// detail view and the previews of that view's adjustment inputs.
///
/// Constructed when the screen mounts and disposed when it unmounts.
/// The cache is written only by fetches and by reconciliation after a
/// commit; everything a presentation layer reads is derived from it on
/// demand.
pub struct ConsoleSession {
    config: ConsoleConfig,
    transport: Arc<dyn ConsoleTransport>,
    reconciler: MutationReconciler,
    previews: PreviewSynchronizer,
    validator: Arc<dyn Validator>,
    /// Held for writing from the start of a commit until it is reconciled.
    commit_gate: Arc<RwLock<()>>,
    /// Lock order: `cache` before `view`.
    cache: RwLock<RowCache>,
    view: RwLock<TableView>,
    selected: RwLock<Option<RowId>>,
    disposed: AtomicBool,
}

impl ConsoleSession {
    /// Creates a session with an empty cache; call [`ConsoleSession::mount`]
    /// to load it.
    pub fn new(
        transport: Arc<dyn ConsoleTransport>,
        projector: Arc<dyn RowProjector>,
        config: ConsoleConfig,
    ) -> ConsoleResult<Self> {
        config.validate()?;

        let mut view = TableView::new(projector.schema(), config.default_page_size)?;
        view.set_sort_config(config.default_sort.clone(), &RowCache::new())?;

        let commit_gate = Arc::new(RwLock::new(()));
        let previews = PreviewSynchronizer::with_commit_gate(
            Arc::clone(&transport),
            config.preview_debounce(),
            Arc::clone(&commit_gate),
        );
        let reconciler = MutationReconciler::new(Arc::clone(&transport), projector);

        Ok(Self {
            config,
            transport,
            reconciler,
            previews,
            validator: Arc::new(RequiredFields::new()),
            commit_gate,
            cache: RwLock::new(RowCache::new()),
            view: RwLock::new(view),
            selected: RwLock::new(None),
            disposed: AtomicBool::new(false),
        })
    }

    /// Replaces the pre-submit gate (by default every payload field is
    /// required).
    #[must_use]
    pub fn with_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// The listing this screen shows.
    pub fn resource(&self) -> ResourceKind {
        self.reconciler.projector().resource()
    }

    fn ensure_live(&self) -> ConsoleResult<()> {
        if self.disposed.load(Ordering::Acquire) {
            return Err(ConsoleError::Disposed);
        }
        Ok(())
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Loads the listing. Returns the number of rows.
    pub async fn mount(&self) -> ConsoleResult<usize> {
        info!("Mounting {} table", self.resource());
        self.refresh().await
    }

    /// Fetches the whole listing again. On failure the cache keeps its rows.
    pub async fn refresh(&self) -> ConsoleResult<usize> {
        self.ensure_live()?;
        let rows = self.reconciler.refetch(&self.cache).await?;
        self.reset_page_if_out_of_range().await;
        Ok(rows)
    }

    /// Cancels all pending previews and closes the session for good.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.previews.dispose();
        *self.selected.write().await = None;
        info!("{} table disposed", self.resource());
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    // ── Table ────────────────────────────────────────────────────

    /// The page to render and the match count for the pager.
    pub async fn visible_page(&self) -> VisiblePage {
        let cache = self.cache.read().await;
        self.view.read().await.visible(&cache)
    }

    pub async fn visible_rows(&self) -> Vec<Row> {
        self.visible_page().await.rows
    }

    /// Rows matching the filter, across all pages.
    pub async fn total_count(&self) -> usize {
        self.visible_page().await.total_count
    }

    /// Rows in the cache, filtered or not.
    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn sort_config(&self) -> SortConfig {
        self.view.read().await.sort_config().clone()
    }

    pub async fn set_sort_config(&self, config: SortConfig) -> ConsoleResult<()> {
        let cache = self.cache.read().await;
        self.view.write().await.set_sort_config(config, &cache)?;
        Ok(())
    }

    /// Header click on `key`.
    pub async fn toggle_sort(&self, key: &str) -> ConsoleResult<()> {
        let cache = self.cache.read().await;
        self.view.write().await.toggle_sort(key, &cache)?;
        Ok(())
    }

    /// Applies a "sort by order" preset such as `"-today_profit"`.
    pub async fn apply_order_param(&self, param: &str) -> ConsoleResult<()> {
        let cache = self.cache.read().await;
        self.view.write().await.apply_order_param(param, &cache)?;
        Ok(())
    }

    pub async fn filter_query(&self) -> String {
        self.view.read().await.filter_query().to_string()
    }

    pub async fn set_filter_query(&self, query: impl Into<String>) {
        let cache = self.cache.read().await;
        self.view.write().await.set_filter_query(query, &cache);
    }

    pub async fn page_window(&self) -> PageWindow {
        self.view.read().await.page_window()
    }

    pub async fn set_page_window(&self, window: PageWindow) -> ConsoleResult<()> {
        self.check_page_size(window.size())?;
        self.view.write().await.set_page_window(window);
        Ok(())
    }

    pub async fn set_page(&self, page: usize) {
        self.view.write().await.set_page(page);
    }

    /// Changes the page size and goes back to the first page. The size must
    /// be one the pager offers.
    pub async fn set_page_size(&self, size: usize) -> ConsoleResult<()> {
        self.check_page_size(size)?;
        self.view.write().await.set_page_size(size)?;
        Ok(())
    }

    fn check_page_size(&self, size: usize) -> ConsoleResult<()> {
        let options = &self.config.page_size_options;
        if size == 0 || (!options.is_empty() && !options.contains(&size)) {
            return Err(TableError::InvalidPageSize(size).into());
        }
        Ok(())
    }

    async fn reset_page_if_out_of_range(&self) {
        let cache = self.cache.read().await;
        self.view.write().await.reset_page_if_out_of_range(&cache);
    }

    // ── Detail view ──────────────────────────────────────────────

    /// Opens the detail view of a cached row. Switching rows cancels every
    /// preview of the previous one.
    pub async fn select(&self, id: &RowId) -> ConsoleResult<Row> {
        self.ensure_live()?;
        let row = self
            .cache
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ConsoleError::RowNotFound(id.clone()))?;

        *self.selected.write().await = Some(id.clone());
        self.previews.set_subject(Some(id.clone()));
        debug!("Row {id} selected");
        Ok(row)
    }

    pub async fn selected_id(&self) -> Option<RowId> {
        self.selected.read().await.clone()
    }

    /// The open row as currently cached, so it always shows the latest
    /// reconciliation. `None` when no view is open or the row is gone.
    pub async fn selected_row(&self) -> Option<Row> {
        let id = self.selected_id().await?;
        self.cache.read().await.get(&id).cloned()
    }

    /// Closes the detail view, cancelling and clearing all its previews.
    pub async fn close_detail(&self) {
        *self.selected.write().await = None;
        self.previews.set_subject(None);
    }

    /// Re-reads the open row from the backend and swaps it into the cache.
    /// Failures are logged and leave the current values in place. Returns
    /// whether the row was updated.
    pub async fn refresh_selected(&self) -> bool {
        let Some(id) = self.selected_id().await else {
            return false;
        };
        match self.transport.fetch_one(self.resource(), &id).await {
            Ok(Some(entity)) => {
                let applied = {
                    let mut cache = self.cache.write().await;
                    self.reconciler.apply_entity(&entity, &mut cache).is_some()
                };
                if applied {
                    self.reset_page_if_out_of_range().await;
                }
                applied
            }
            Ok(None) => {
                debug!("Row {id} not returned by the backend");
                false
            }
            Err(err) => {
                debug!("Refreshing row {id} failed: {err}");
                false
            }
        }
    }

    // ── Previews ─────────────────────────────────────────────────

    /// Feeds the raw text of an adjustment input of the open row to its
    /// preview.
    pub async fn on_adjustment_input(&self, family: FieldFamily, value: &str) -> ConsoleResult<()> {
        self.ensure_live()?;
        let id = self.selected_id().await.ok_or(ConsoleError::NoSubject)?;
        self.previews.on_input(family, &id, value);
        Ok(())
    }

    pub fn preview(&self, family: FieldFamily) -> Option<PreviewResult> {
        self.previews.result(family)
    }

    pub fn preview_phase(&self, family: FieldFamily) -> PreviewPhase {
        self.previews.phase(family)
    }

    /// Whether the family has a request out.
    pub fn is_preview_in_flight(&self, family: FieldFamily) -> bool {
        self.previews.is_in_flight(family)
    }

    /// Busy indicator for the family: waiting out the quiet period or
    /// awaiting a reply.
    pub fn is_preview_pending(&self, family: FieldFamily) -> bool {
        self.previews.is_pending(family)
    }

    /// The raw text last entered for the family.
    pub fn adjustment_input(&self, family: FieldFamily) -> String {
        self.previews.input(family)
    }

    // ── Commits ──────────────────────────────────────────────────

    /// Validates and sends a write, then reconciles the cache with the
    /// backend's answer.
    ///
    /// Nothing is sent when validation fails. When the backend rejects the
    /// write the cache is left untouched. No preview request starts between
    /// sending the write and applying its reconciliation. A successful
    /// adjustment of the open row clears its family's input and preview.
    pub async fn commit(&self, request: CommitRequest) -> ConsoleResult<CommitReport> {
        self.ensure_live()?;
        let operation = request.operation;
        let subject = request.subject.clone();

        if let Err(err) = self.validator.validate(&request) {
            debug!("{operation} blocked before sending: {err}");
            return Err(err.into());
        }

        let _gate = self.commit_gate.write().await;
        let response = match self.transport.commit(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("{operation} failed: {err}");
                return Err(err);
            }
        };

        let reconciliation = self
            .reconciler
            .reconcile(response.entity.as_ref(), &self.cache)
            .await;
        // A replaced row may no longer match the filter.
        self.reset_page_if_out_of_range().await;
        if let Some(family) = operation.family()
            && subject.is_some()
            && subject == self.selected_id().await
        {
            self.previews.clear(family);
        }

        info!("{operation} committed: {reconciliation:?}");
        Ok(CommitReport {
            operation,
            message: response.message,
            reconciliation,
        })
    }
}
