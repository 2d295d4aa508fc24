//! Debounced, cancellable previews of pending adjustments.
//!
//! Each field family runs its own state machine:
//!
//! ```text
//! Idle ──edit──► Waiting ──quiet period──► InFlight(token) ──reply──► Idle
//!   ▲               │                           │
//!   └──empty input / subject change / dispose ──┘
//! ```
//!
//! A new edit restarts the quiet period and aborts any request still out, so
//! a family has at most one live request. A reply is applied only while its
//! token is still the family's live one, so replies land in issuance order
//! no matter when they arrive.

use crate::protocol::PreviewResult;
use crate::transport::ConsoleTransport;
use opsdesk_types::{FieldFamily, RequestToken, RowId, TokenSource};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Where a family's preview currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewPhase {
    /// Nothing pending. A result may or may not be shown.
    #[default]
    Idle,
    /// An edit is waiting out the quiet period.
    Waiting,
    /// A request is out; only its reply will be applied.
    InFlight(RequestToken),
}

#[derive(Debug, Default)]
struct FamilySlot {
    input: String,
    result: Option<PreviewResult>,
    phase: PreviewPhase,
    /// Bumped on every edit; a timer only fires for the edit that armed it.
    edit: u64,
    /// The task waiting out the quiet period, then awaiting the reply.
    task: Option<JoinHandle<()>>,
}

impl FamilySlot {
    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.phase = PreviewPhase::Idle;
    }

    fn reset(&mut self) {
        self.cancel();
        self.result = None;
        self.input.clear();
    }
}

#[derive(Debug, Default)]
struct PreviewState {
    subject: Option<RowId>,
    slots: HashMap<FieldFamily, FamilySlot>,
    disposed: bool,
}

impl PreviewState {
    fn reset_all(&mut self) {
        for slot in self.slots.values_mut() {
            slot.reset();
        }
    }

    /// The slot a timer armed by `edit` may still fire for.
    fn armed_slot(&mut self, family: FieldFamily, subject: &RowId, edit: u64) -> Option<&mut FamilySlot> {
        if self.disposed || self.subject.as_ref() != Some(subject) {
            return None;
        }
        self.slots
            .get_mut(&family)
            .filter(|slot| slot.edit == edit && slot.phase == PreviewPhase::Waiting)
    }
}

struct Shared {
    transport: Arc<dyn ConsoleTransport>,
    debounce: Duration,
    tokens: TokenSource,
    /// Held for writing by a commit until its reconciliation is applied.
    commit_gate: Arc<RwLock<()>>,
    state: Mutex<PreviewState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PreviewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Server-computed previews for every adjustable family of one detail view.
///
/// Must be driven from within a tokio runtime: every edit spawns the task
/// that waits out the quiet period and sends the request. Dropping the
/// synchronizer cancels everything still pending.
pub struct PreviewSynchronizer {
    shared: Arc<Shared>,
}

impl PreviewSynchronizer {
    pub fn new(transport: Arc<dyn ConsoleTransport>, debounce: Duration) -> Self {
        Self::with_commit_gate(transport, debounce, Arc::new(RwLock::new(())))
    }

    /// Shares `commit_gate` with whoever commits writes. While the gate is
    /// held for writing, no new preview request starts.
    pub fn with_commit_gate(
        transport: Arc<dyn ConsoleTransport>,
        debounce: Duration,
        commit_gate: Arc<RwLock<()>>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                transport,
                debounce,
                tokens: TokenSource::new(),
                commit_gate,
                state: Mutex::new(PreviewState::default()),
            }),
        }
    }

    pub fn commit_gate(&self) -> Arc<RwLock<()>> {
        Arc::clone(&self.shared.commit_gate)
    }

    pub fn debounce(&self) -> Duration {
        self.shared.debounce
    }

    /// The row previews are computed for.
    pub fn subject(&self) -> Option<RowId> {
        self.shared.lock().subject.clone()
    }

    /// Points the previews at another row, or at none when the view closes.
    /// Any change cancels every pending timer and request and clears all
    /// results and inputs.
    pub fn set_subject(&self, subject: Option<RowId>) {
        let mut state = self.shared.lock();
        if state.subject == subject {
            return;
        }
        debug!(
            "Preview subject changed from {:?} to {:?}",
            state.subject, subject
        );
        state.reset_all();
        state.subject = subject;
    }

    /// Records the raw text of an adjustment input.
    ///
    /// Blank input clears the family's result at once and cancels whatever
    /// it had pending; nothing is sent. Any other input (re)starts the quiet
    /// period, after which exactly one request goes out with the latest text.
    pub fn on_input(&self, family: FieldFamily, subject: &RowId, raw: &str) {
        let mut state = self.shared.lock();
        if state.disposed {
            debug!("Ignoring {family} input after dispose");
            return;
        }
        if state.subject.as_ref() != Some(subject) {
            debug!("Preview subject changed to {subject}");
            state.reset_all();
            state.subject = Some(subject.clone());
        }

        let slot = state.slots.entry(family).or_default();
        slot.input = raw.to_string();
        slot.edit += 1;

        if raw.trim().is_empty() {
            slot.cancel();
            slot.result = None;
            debug!("{family} input cleared, preview dropped");
            return;
        }

        if let PreviewPhase::InFlight(token) = slot.phase {
            debug!("{family} preview {token} superseded");
        }
        slot.cancel();
        slot.phase = PreviewPhase::Waiting;

        debug!(
            "{family} preview scheduled in {:?} (edit {})",
            self.shared.debounce, slot.edit
        );
        slot.task = Some(tokio::spawn(run_preview(
            Arc::clone(&self.shared),
            family,
            subject.clone(),
            raw.to_string(),
            slot.edit,
        )));
    }

    /// The family's current result.
    pub fn result(&self, family: FieldFamily) -> Option<PreviewResult> {
        self.shared
            .lock()
            .slots
            .get(&family)
            .and_then(|slot| slot.result.clone())
    }

    /// The raw text last entered for the family.
    pub fn input(&self, family: FieldFamily) -> String {
        self.shared
            .lock()
            .slots
            .get(&family)
            .map(|slot| slot.input.clone())
            .unwrap_or_default()
    }

    pub fn phase(&self, family: FieldFamily) -> PreviewPhase {
        self.shared
            .lock()
            .slots
            .get(&family)
            .map(|slot| slot.phase)
            .unwrap_or_default()
    }

    pub fn is_in_flight(&self, family: FieldFamily) -> bool {
        matches!(self.phase(family), PreviewPhase::InFlight(_))
    }

    /// Whether the family has work outstanding: an edit waiting out the
    /// quiet period or a request awaiting its reply.
    pub fn is_pending(&self, family: FieldFamily) -> bool {
        self.phase(family) != PreviewPhase::Idle
    }

    /// Cancels the family's pending work and clears its input and result.
    pub fn clear(&self, family: FieldFamily) {
        if let Some(slot) = self.shared.lock().slots.get_mut(&family) {
            slot.reset();
        }
    }

    /// Cancels pending work and clears every family.
    pub fn cancel_all(&self) {
        self.shared.lock().reset_all();
    }

    /// Cancels everything and ignores all further input.
    pub fn dispose(&self) {
        let mut state = self.shared.lock();
        state.reset_all();
        state.subject = None;
        state.disposed = true;
        debug!("Preview synchronizer disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }
}

impl Drop for PreviewSynchronizer {
    fn drop(&mut self) {
        self.shared.lock().reset_all();
    }
}

async fn run_preview(
    shared: Arc<Shared>,
    family: FieldFamily,
    subject: RowId,
    value: String,
    edit: u64,
) {
    tokio::time::sleep(shared.debounce).await;

    let gate = shared.commit_gate.read().await;
    let token = {
        let mut state = shared.lock();
        let Some(slot) = state.armed_slot(family, &subject, edit) else {
            return;
        };
        let token = shared.tokens.issue();
        slot.phase = PreviewPhase::InFlight(token);
        token
    };
    drop(gate);

    debug!("{family} preview {token} sent for {subject}: {value:?}");
    let outcome = shared
        .transport
        .compute_preview(family, &subject, &value)
        .await;

    let mut state = shared.lock();
    let subject_current = state.subject.as_ref() == Some(&subject);
    let Some(slot) = state.slots.get_mut(&family) else {
        return;
    };
    if !subject_current || slot.phase != PreviewPhase::InFlight(token) {
        debug!("Dropping stale {family} preview {token}");
        return;
    }

    slot.phase = PreviewPhase::Idle;
    match outcome {
        Ok(result) => {
            debug!("{family} preview {token} applied");
            slot.result = result;
        }
        Err(err) => {
            warn!("{family} preview {token} failed: {err}");
            slot.result = None;
        }
    }
}
