//! Filter, sort and page state for one table screen.

use crate::cache::RowCache;
use crate::error::{TableError, TableResult};
use crate::filter;
use crate::page::{self, PageWindow};
use crate::sort::{self, SortConfig};
use opsdesk_model::{Row, TableSchema};
use serde::Serialize;
use tracing::debug;

/// The slice of rows a table renders, plus the count its pager shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisiblePage {
    pub rows: Vec<Row>,
    /// Rows matching the filter, across all pages.
    pub total_count: usize,
    pub window: PageWindow,
}

/// Search, sort and page state of a table.
///
/// The view never writes to the cache; every read derives the page afresh
/// from the cache it is handed.
#[derive(Debug, Clone)]
pub struct TableView {
    schema: TableSchema,
    filter_query: String,
    sort: SortConfig,
    window: PageWindow,
}

impl TableView {
    /// Starts unfiltered, on the first page, sorted ascending by the schema's
    /// default key.
    pub fn new(schema: TableSchema, page_size: usize) -> TableResult<Self> {
        let window = PageWindow::first(page_size)?;
        let sort = SortConfig::ascending(schema.default_sort_key.clone());
        Ok(Self {
            schema,
            filter_query: String::new(),
            sort,
            window,
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    pub fn sort_config(&self) -> &SortConfig {
        &self.sort
    }

    pub fn page_window(&self) -> PageWindow {
        self.window
    }

    /// Sets the search text. Goes back to the first page if the new match
    /// count leaves the current page empty.
    pub fn set_filter_query(&mut self, query: impl Into<String>, cache: &RowCache) {
        self.filter_query = query.into();
        self.reset_page_if_out_of_range(cache);
    }

    /// Sets the sort. The key must be a column of the table or a field of
    /// the cached rows.
    pub fn set_sort_config(&mut self, config: SortConfig, cache: &RowCache) -> TableResult<()> {
        if !self.schema.has_column(&config.key) && !cache.has_field(&config.key) {
            return Err(TableError::UnknownColumn(config.key));
        }
        debug!("Sort set to {} {:?}", config.key, config.direction);
        self.sort = config;
        Ok(())
    }

    /// Header click on `key`; see [`SortConfig::toggled`].
    pub fn toggle_sort(&mut self, key: &str, cache: &RowCache) -> TableResult<()> {
        let next = self.sort.toggled(key);
        self.set_sort_config(next, cache)
    }

    /// Applies a "sort by order" preset; see [`SortConfig::from_order_param`].
    pub fn apply_order_param(&mut self, param: &str, cache: &RowCache) -> TableResult<()> {
        let next = SortConfig::from_order_param(param, &self.schema.default_sort_key);
        self.set_sort_config(next, cache)
    }

    /// Replaces the window. A size change always lands on the first page.
    pub fn set_page_window(&mut self, window: PageWindow) {
        self.window = if window.size() != self.window.size() {
            window.with_page(0)
        } else {
            window
        };
    }

    pub fn set_page(&mut self, page: usize) {
        self.window = self.window.with_page(page);
    }

    /// Changes the page size and goes back to the first page.
    pub fn set_page_size(&mut self, size: usize) -> TableResult<()> {
        self.window = PageWindow::first(size)?;
        Ok(())
    }

    /// Goes back to the first page when the current one would show nothing.
    /// Called after anything that can shrink the match count, such as a
    /// cache refetch. Returns whether the page was reset.
    pub fn reset_page_if_out_of_range(&mut self, cache: &RowCache) -> bool {
        let total = self.filtered(cache).len();
        if self.window.is_in_range(total) {
            return false;
        }
        debug!(
            "Page {} out of range for {} rows, back to first page",
            self.window.page(),
            total
        );
        self.window = self.window.with_page(0);
        true
    }

    /// Matching rows in cache order.
    pub fn filtered<'a>(&self, cache: &'a RowCache) -> Vec<&'a Row> {
        filter::filter_rows(cache.rows(), &self.filter_query)
    }

    /// Matching rows in sort order.
    pub fn filtered_sorted<'a>(&self, cache: &'a RowCache) -> Vec<&'a Row> {
        let mut rows = self.filtered(cache);
        sort::sort_rows(&mut rows, &self.sort, &self.schema);
        rows
    }

    /// The page to render.
    pub fn visible(&self, cache: &RowCache) -> VisiblePage {
        let sorted = self.filtered_sorted(cache);
        let rows = page::slice(&sorted, self.window)
            .iter()
            .map(|row| (*row).clone())
            .collect();
        VisiblePage {
            rows,
            total_count: sorted.len(),
            window: self.window,
        }
    }
}
