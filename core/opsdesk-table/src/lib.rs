//! Client-side table engine for opsdesk.
//!
//! Holds the session's row cache and derives the visible page from it:
//!
//! ```text
//! RowCache ──► filter ──► sort ──► page ──► VisiblePage
//! ```
//!
//! - **Cache**: one row per identity, replaced in bulk or point-updated
//! - **Filter**: case-insensitive substring match over every field of a row
//! - **Sort**: per-column coercion table, stable, single key
//! - **Page**: fixed-size windows that never clamp on their own
//!
//! Filter, sort and page only ever read the cache, so a presentation layer
//! can re-derive the page on every render.
//!
//! # Example
//!
//! ```
//! use opsdesk_model::{RawEntity, RowProjector, UserProjector};
//! use opsdesk_table::{RowCache, TableView};
//! use opsdesk_types::ResourceKind;
//! use serde_json::json;
//!
//! let projector = UserProjector;
//! let raws = vec![
//!     RawEntity::new(ResourceKind::Users, json!({"id": 1, "username": "alice01"})),
//!     RawEntity::new(ResourceKind::Users, json!({"id": 2, "username": "bob"})),
//! ];
//! let mut cache = RowCache::new();
//! cache.replace_all(projector.project_all(&raws));
//!
//! let mut view = TableView::new(projector.schema(), 5).unwrap();
//! view.set_filter_query("ali", &cache);
//! assert_eq!(view.visible(&cache).total_count, 1);
//! ```

mod cache;
mod error;
pub mod filter;
pub mod page;
pub mod sort;
mod view;

pub use cache::RowCache;
pub use error::{TableError, TableResult};
pub use page::PageWindow;
pub use sort::{SortConfig, SortDirection};
pub use view::{TableView, VisiblePage};
