//! Preview synchronization and commit reconciliation for opsdesk tables.
//!
//! # Architecture
//!
//! A [`ConsoleSession`] backs one table screen. It owns the row cache and
//! the filter/sort/page state from `opsdesk-table`, and talks to the admin
//! backend only through a [`ConsoleTransport`].
//!
//! ## Components
//!
//! - **Transport**: fetches listings, computes previews, commits writes
//! - **Protocol**: preview results, commit requests and responses
//! - **Preview**: per-family debounce and stale-reply rejection
//! - **Reconcile**: point update or full refetch after every write
//! - **Validation**: the gate a commit passes before it is sent
//! - **Session**: ties the above to the cache and the open detail view
//!
//! ## Adjusting a value
//!
//! 1. **Edit**: every keystroke restarts the family's quiet period
//! 2. **Preview**: after the quiet period one request goes out, tagged
//! 3. **Apply**: the reply is shown only if no newer request was issued
//! 4. **Commit**: validated, sent, never debounced or superseded
//! 5. **Reconcile**: the returned entity replaces its row, or the listing
//!    is fetched again
//!
//! # Example
//!
//! ```
//! use opsdesk_model::UserProjector;
//! use opsdesk_sync::transport::mock::MockTransport;
//! use opsdesk_sync::{ConsoleConfig, ConsoleSession};
//! use std::sync::Arc;
//!
//! let session = ConsoleSession::new(
//!     Arc::new(MockTransport::new()),
//!     Arc::new(UserProjector),
//!     ConsoleConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(session.config().preview_debounce_ms, 500);
//! ```

mod config;
mod error;
mod preview;
pub mod protocol;
mod reconcile;
mod session;
pub mod transport;
mod validation;

pub use config::ConsoleConfig;
pub use error::{ConsoleError, ConsoleResult, GENERIC_FAILURE};
pub use preview::{PreviewPhase, PreviewSynchronizer};
pub use protocol::{CommitRequest, CommitResponse, CompanionValue, PreviewFlag, PreviewResult};
pub use reconcile::{MutationReconciler, Reconciliation};
pub use session::{CommitReport, ConsoleSession};
pub use transport::ConsoleTransport;
pub use validation::{RequiredFields, ValidationError, Validator};
