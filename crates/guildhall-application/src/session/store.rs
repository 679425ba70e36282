//! Session store.
//!
//! Owns the single `SessionState` of the client and broadcasts it through a
//! `watch` channel. Requests are numbered; only the most recently issued one
//! may apply its result.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use guildhall_core::session::{AuthService, Session, SessionState};
use tokio::sync::watch;

pub struct SessionStore {
    auth: Arc<dyn AuthService>,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
}

impl SessionStore {
    /// Creates a store in the loading state. Call [`initialize`](Self::initialize) next.
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        let (state, _) = watch::channel(SessionState::loading());
        Self {
            auth,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Silent restore from the ambient credentials.
    ///
    /// Any failure leaves the visitor anonymous; nothing is returned.
    pub async fn initialize(&self) {
        let ticket = self.next_ticket();
        self.state.send_modify(|state| state.is_loading = true);

        let next = match self.auth.current_user().await {
            Ok(user) => SessionState::authenticated(user),
            Err(e) => {
                if e.is_unauthenticated() {
                    tracing::debug!("[SessionStore] No active session");
                } else {
                    tracing::warn!("[SessionStore] Session restore failed: {}", e);
                }
                SessionState::anonymous()
            }
        };

        self.apply(ticket, |_| next);
    }

    /// Re-reads the current user record.
    ///
    /// A 401 clears the session; any other failure keeps the current one.
    /// Returns the user as seen after this call.
    pub async fn refresh(&self) -> Option<Session> {
        let ticket = self.next_ticket();

        match self.auth.current_user().await {
            Ok(user) => {
                self.apply(ticket, |_| SessionState::authenticated(user));
            }
            Err(e) if e.is_unauthenticated() => {
                tracing::debug!("[SessionStore] Session expired");
                self.apply(ticket, |_| SessionState::anonymous());
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Session refresh failed, keeping session: {}", e);
                self.apply(ticket, |current| SessionState {
                    user: current.user.clone(),
                    is_loading: false,
                });
            }
        }

        self.user()
    }

    /// Ends the session server-side (best effort) and clears it locally.
    pub async fn logout(&self) {
        if let Err(e) = self.auth.logout().await {
            tracing::warn!("[SessionStore] Logout request failed: {}", e);
        }

        // Anything still in flight belongs to the old session.
        self.next_ticket();
        let previous = self.state.send_replace(SessionState::anonymous());
        if let Some(user) = previous.user {
            tracing::info!("[SessionStore] Logged out user {}", user.user_id);
        }
    }

    pub fn user(&self) -> Option<Session> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply<F>(&self, ticket: u64, next: F) -> bool
    where
        F: FnOnce(&SessionState) -> SessionState,
    {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                tracing::debug!("[SessionStore] Discarded stale session response");
                return false;
            }
            let next = next(state);
            if *state == next {
                return false;
            }
            if state.user_id() != next.user_id() {
                tracing::info!(
                    "[SessionStore] Identity changed: {:?} -> {:?}",
                    state.user_id(),
                    next.user_id()
                );
            }
            *state = next;
            true
        })
    }
}
