//! Generation-guarded snapshot storage shared by every provider.
//!
//! Each fetch takes a [`Ticket`] before it starts. When the response lands it
//! is applied only if no newer ticket was issued and no reset happened in the
//! meantime, so an out-of-order or pre-switch response can never overwrite
//! fresher state.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// What a view reads from a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderState<T> {
    pub snapshot: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ProviderState<T> {
    fn default() -> Self {
        Self {
            snapshot: None,
            is_loading: false,
            error: None,
        }
    }
}

/// Request number handed out by [`SnapshotCell::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

pub struct SnapshotCell<T> {
    generation: AtomicU64,
    state: watch::Sender<ProviderState<T>>,
}

impl<T: Clone> SnapshotCell<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ProviderState::default());
        Self {
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Issues a new ticket and marks the cell as loading.
    ///
    /// Any ticket handed out earlier becomes stale.
    pub fn begin(&self) -> Ticket {
        let ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        self.state.send_modify(|state| state.is_loading = true);
        ticket
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Replaces the snapshot wholesale and clears the error.
    ///
    /// Returns `false` when the ticket was stale and nothing was applied.
    pub fn succeed(&self, ticket: Ticket, snapshot: Option<T>) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(ticket) {
                return false;
            }
            state.snapshot = snapshot;
            state.is_loading = false;
            state.error = None;
            true
        })
    }

    /// Records a failure. The previous snapshot stays visible.
    pub fn fail(&self, ticket: Ticket, error: impl Into<String>) -> bool {
        let error = error.into();
        self.state.send_if_modified(|state| {
            if !self.is_current(ticket) {
                return false;
            }
            state.is_loading = false;
            state.error = Some(error);
            true
        })
    }

    /// Ends loading without touching the snapshot or error.
    pub fn settle(&self, ticket: Ticket) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(ticket) || !state.is_loading {
                return false;
            }
            state.is_loading = false;
            true
        })
    }

    /// Back to the empty state. Outstanding tickets are invalidated.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(ProviderState::default());
    }

    pub fn state(&self) -> ProviderState<T> {
        self.state.borrow().clone()
    }

    pub fn snapshot(&self) -> Option<T> {
        self.state.borrow().snapshot.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProviderState<T>> {
        self.state.subscribe()
    }
}

impl<T: Clone> Default for SnapshotCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
