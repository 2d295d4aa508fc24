//! Fixed-size page windows.
//!
//! A window is never clamped to the data it is applied to. A page past the
//! end yields an empty slice; resetting to the first page is the caller's
//! job ([`crate::TableView`] does it whenever the page size or the filtered
//! count changes).

use crate::error::{TableError, TableResult};
use serde::{Deserialize, Serialize};

/// Page index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    page: usize,
    size: usize,
}

impl PageWindow {
    /// Creates a window. `size` must be positive.
    pub fn new(page: usize, size: usize) -> TableResult<Self> {
        if size == 0 {
            return Err(TableError::InvalidPageSize(size));
        }
        Ok(Self { page, size })
    }

    /// First page of the given size.
    pub fn first(size: usize) -> TableResult<Self> {
        Self::new(0, size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the first item on this page.
    pub fn start(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    /// Same size, different page.
    #[must_use]
    pub fn with_page(self, page: usize) -> Self {
        Self { page, ..self }
    }

    /// Whether this page shows at least one of `total` items. The first page
    /// is always in range, even when there is nothing to show.
    pub fn is_in_range(&self, total: usize) -> bool {
        self.page == 0 || self.start() < total
    }

    /// Number of pages needed for `total` items.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.size)
    }
}

/// The items of `sequence` inside `window`: `sequence[page*size .. page*size+size]`,
/// cut short at the end, empty past it.
pub fn slice<T>(sequence: &[T], window: PageWindow) -> &[T] {
    let start = window.start().min(sequence.len());
    let end = start.saturating_add(window.size()).min(sequence.len());
    &sequence[start..end]
}
