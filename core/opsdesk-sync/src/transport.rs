//! Transport layer abstraction.
//!
//! The session never speaks HTTP itself. A host plugs in a
//! [`ConsoleTransport`] that reaches the admin backend; tests plug in
//! [`mock::MockTransport`].

use crate::error::ConsoleResult;
use crate::protocol::{CommitRequest, CommitResponse, PreviewResult};
use async_trait::async_trait;
use opsdesk_model::RawEntity;
use opsdesk_types::{FieldFamily, ResourceKind, RowId};

/// The admin backend, as seen by a console session.
#[async_trait]
pub trait ConsoleTransport: Send + Sync {
    /// Fetches a whole listing.
    async fn fetch_all(&self, resource: ResourceKind) -> ConsoleResult<Vec<RawEntity>>;

    /// Fetches a single record. Transports without a dedicated endpoint fall
    /// back to fetching the listing and picking the record out of it.
    async fn fetch_one(
        &self,
        resource: ResourceKind,
        id: &RowId,
    ) -> ConsoleResult<Option<RawEntity>> {
        let listing = self.fetch_all(resource).await?;
        Ok(listing
            .into_iter()
            .find(|raw| raw.id().as_ref() == Some(id)))
    }

    /// Asks the backend what an adjustment would do. Side-effect free.
    /// `Ok(None)` means the backend answered without a preview.
    async fn compute_preview(
        &self,
        family: FieldFamily,
        subject: &RowId,
        adjustment: &str,
    ) -> ConsoleResult<Option<PreviewResult>>;

    /// Sends a write.
    async fn commit(&self, request: CommitRequest) -> ConsoleResult<CommitResponse>;
}

/// A scripted transport for testing.
pub mod mock {
    use super::*;
    use crate::error::ConsoleError;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use std::time::Duration;

    /// A call the mock received, in arrival order.
    #[derive(Debug, Clone, PartialEq)]
    pub enum MockCall {
        FetchAll(ResourceKind),
        FetchOne(ResourceKind, RowId),
        Preview {
            family: FieldFamily,
            subject: RowId,
            adjustment: String,
        },
        Commit(CommitRequest),
    }

    #[derive(Debug)]
    enum Reply<T> {
        Ok(T),
        Backend { status: u16, message: Option<String> },
        Unreachable,
    }

    impl<T> Reply<T> {
        fn into_result(self) -> ConsoleResult<T> {
            match self {
                Self::Ok(value) => Ok(value),
                Self::Backend { status, message } => Err(ConsoleError::Backend { status, message }),
                Self::Unreachable => Err(ConsoleError::Network("connection refused".into())),
            }
        }
    }

    #[derive(Debug)]
    struct Scripted<T> {
        delay: Duration,
        reply: Reply<T>,
    }

    #[derive(Debug, Default)]
    struct MockState {
        listings: HashMap<ResourceKind, Vec<RawEntity>>,
        fetches_fail: bool,
        previews: VecDeque<Scripted<Option<PreviewResult>>>,
        commits: VecDeque<Scripted<CommitResponse>>,
        calls: Vec<MockCall>,
    }

    /// An in-memory backend that records every call.
    ///
    /// Listings are served from whatever was last set with
    /// [`MockTransport::set_listing`]. Previews and commits are answered from
    /// queues, each reply optionally delayed; with an empty queue a preview
    /// echoes the adjustment on a zero balance and a commit returns no entity.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        state: Mutex<MockState>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn state(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Sets the listing served for `resource`.
        pub fn set_listing(&self, resource: ResourceKind, entities: Vec<RawEntity>) {
            self.state().listings.insert(resource, entities);
        }

        /// Makes every listing fetch fail (or succeed again).
        pub fn fail_fetches(&self, fail: bool) {
            self.state().fetches_fail = fail;
        }

        /// Queues a preview reply.
        pub fn push_preview(&self, preview: Option<PreviewResult>, delay: Duration) {
            self.state().previews.push_back(Scripted {
                delay,
                reply: Reply::Ok(preview),
            });
        }

        /// Queues a failed preview.
        pub fn push_preview_failure(&self, status: u16, delay: Duration) {
            self.state().previews.push_back(Scripted {
                delay,
                reply: Reply::Backend {
                    status,
                    message: None,
                },
            });
        }

        /// Queues a commit reply.
        pub fn push_commit(&self, response: CommitResponse) {
            self.push_commit_after(response, Duration::ZERO);
        }

        /// Queues a commit reply that arrives after `delay`.
        pub fn push_commit_after(&self, response: CommitResponse, delay: Duration) {
            self.state().commits.push_back(Scripted {
                delay,
                reply: Reply::Ok(response),
            });
        }

        /// Queues a rejected commit.
        pub fn push_commit_failure(&self, status: u16, message: Option<&str>) {
            self.state().commits.push_back(Scripted {
                delay: Duration::ZERO,
                reply: Reply::Backend {
                    status,
                    message: message.map(str::to_string),
                },
            });
        }

        /// Queues a commit that never reaches the backend.
        pub fn push_commit_unreachable(&self) {
            self.state().commits.push_back(Scripted {
                delay: Duration::ZERO,
                reply: Reply::Unreachable,
            });
        }

        /// Every call received so far.
        pub fn calls(&self) -> Vec<MockCall> {
            self.state().calls.clone()
        }

        /// Adjustment strings of the preview calls received so far.
        pub fn preview_inputs(&self, family: FieldFamily) -> Vec<String> {
            self.state()
                .calls
                .iter()
                .filter_map(|call| match call {
                    MockCall::Preview {
                        family: f,
                        adjustment,
                        ..
                    } if *f == family => Some(adjustment.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn commit_count(&self) -> usize {
            self.state()
                .calls
                .iter()
                .filter(|call| matches!(call, MockCall::Commit(_)))
                .count()
        }

        pub fn fetch_count(&self, resource: ResourceKind) -> usize {
            self.state()
                .calls
                .iter()
                .filter(|call| matches!(call, MockCall::FetchAll(r) if *r == resource))
                .count()
        }

        fn record(&self, call: MockCall) {
            self.state().calls.push(call);
        }
    }

    #[async_trait]
    impl ConsoleTransport for MockTransport {
        async fn fetch_all(&self, resource: ResourceKind) -> ConsoleResult<Vec<RawEntity>> {
            self.record(MockCall::FetchAll(resource));
            let state = self.state();
            if state.fetches_fail {
                return Err(ConsoleError::Network("connection refused".into()));
            }
            Ok(state.listings.get(&resource).cloned().unwrap_or_default())
        }

        async fn fetch_one(
            &self,
            resource: ResourceKind,
            id: &RowId,
        ) -> ConsoleResult<Option<RawEntity>> {
            self.record(MockCall::FetchOne(resource, id.clone()));
            let state = self.state();
            if state.fetches_fail {
                return Err(ConsoleError::Network("connection refused".into()));
            }
            Ok(state.listings.get(&resource).and_then(|listing| {
                listing
                    .iter()
                    .find(|raw| raw.id().as_ref() == Some(id))
                    .cloned()
            }))
        }

        async fn compute_preview(
            &self,
            family: FieldFamily,
            subject: &RowId,
            adjustment: &str,
        ) -> ConsoleResult<Option<PreviewResult>> {
            let scripted = {
                let mut state = self.state();
                state.calls.push(MockCall::Preview {
                    family,
                    subject: subject.clone(),
                    adjustment: adjustment.to_string(),
                });
                state.previews.pop_front()
            };
            let Some(Scripted { delay, reply }) = scripted else {
                let amount = opsdesk_model::coerce::parse_float_prefix(adjustment).unwrap_or(0.0);
                return Ok(Some(PreviewResult::new(family, 0.0, amount, amount)));
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply.into_result()
        }

        async fn commit(&self, request: CommitRequest) -> ConsoleResult<CommitResponse> {
            let scripted = {
                let mut state = self.state();
                state.calls.push(MockCall::Commit(request));
                state.commits.pop_front()
            };
            let Some(Scripted { delay, reply }) = scripted else {
                return Ok(CommitResponse::default());
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply.into_result()
        }
    }
}
