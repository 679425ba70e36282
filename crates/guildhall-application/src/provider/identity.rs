//! Identity change fan-out.
//!
//! Providers never poll the session themselves; the listener watches the
//! session store and tells each bound provider when the user changes.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use guildhall_core::session::{Session, SessionState};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

/// A provider whose state is scoped to the current user.
#[async_trait]
pub trait IdentityBound: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called once the session has resolved and whenever the user id changes.
    ///
    /// `None` means nobody is logged in.
    async fn on_identity_change(&self, session: Option<&Session>);
}

pub struct IdentityListener;

impl IdentityListener {
    /// Spawns the listener task.
    ///
    /// The first dispatch happens as soon as the session is no longer
    /// loading. The task ends when `cancel` fires or the store is dropped.
    pub fn spawn(
        mut session: watch::Receiver<SessionState>,
        providers: Vec<Arc<dyn IdentityBound>>,
        cancel: CancellationToken,
    ) -> ListenerHandle {
        let (progress, dispatched_rx) = watch::channel(None);
        let task = tokio::spawn(async move {
            // None until the first dispatch, so an anonymous start still fires.
            let mut dispatched: Option<Option<String>> = None;

            'listen: loop {
                let resolved = {
                    let state = session.borrow_and_update();
                    (!state.is_loading).then(|| state.user.clone())
                };

                if let Some(user) = resolved {
                    let user_id = user.as_ref().map(|u| u.user_id.clone());
                    if dispatched.as_ref() != Some(&user_id) {
                        tracing::info!(
                            "[IdentityListener] Identity resolved to {:?}, notifying {} providers",
                            user_id,
                            providers.len()
                        );
                        // Cleared first so an interrupted dispatch is always retried.
                        dispatched = None;
                        let notify = join_all(
                            providers
                                .iter()
                                .map(|provider| provider.on_identity_change(user.as_ref())),
                        );
                        tokio::pin!(notify);
                        loop {
                            tokio::select! {
                                _ = cancel.cancelled() => break 'listen,
                                _ = &mut notify => break,
                                changed = session.changed() => {
                                    if changed.is_err() {
                                        break 'listen;
                                    }
                                    let same_identity = {
                                        let state = session.borrow_and_update();
                                        !state.is_loading && state.user_id() == user_id.as_deref()
                                    };
                                    if !same_identity {
                                        // Superseded: the pending futures are dropped.
                                        tracing::debug!(
                                            "[IdentityListener] Dispatch for {:?} superseded",
                                            user_id
                                        );
                                        continue 'listen;
                                    }
                                }
                            }
                        }
                        dispatched = Some(user_id);
                        progress.send_replace(dispatched.clone());
                    }
                }

                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = session.changed() => {
                        if changed.is_err() {
                            tracing::debug!("[IdentityListener] Session store dropped");
                            break;
                        }
                    }
                }
            }

            tracing::debug!("[IdentityListener] Stopped");
        });

        ListenerHandle {
            task,
            dispatched: dispatched_rx,
        }
    }
}

pub struct ListenerHandle {
    task: JoinHandle<()>,
    dispatched: watch::Receiver<Option<Option<String>>>,
}

impl ListenerHandle {
    /// Identity of the last completed dispatch. `None` before the first one.
    pub fn last_dispatched(&self) -> Option<Option<String>> {
        self.dispatched.borrow().clone()
    }

    /// Waits until providers have been notified at least once.
    ///
    /// Returns `false` if the listener stopped first.
    pub async fn wait_for_dispatch(&mut self) -> bool {
        self.dispatched.wait_for(|d| d.is_some()).await.is_ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) -> Result<(), JoinError> {
        self.task.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{BalanceProvider, ProgressionProvider, ProviderState};
    use crate::session::SessionStore;
    use crate::testing::{
        MockAuthService, MockBalanceService, MockProgressionService, snapshot, user,
    };
    use guildhall_core::error::{HubError, Result};
    use guildhall_core::progression::{ProgressionService, ProgressionSnapshot};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers each call with the next scripted (delay, snapshot) pair.
    struct ScriptedProgression {
        script: Mutex<VecDeque<(Duration, ProgressionSnapshot)>>,
    }

    impl ScriptedProgression {
        fn new(entries: impl IntoIterator<Item = (Duration, ProgressionSnapshot)>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(entries.into_iter().collect()),
            })
        }

        fn remaining(&self) -> usize {
            self.script.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ProgressionService for ScriptedProgression {
        async fn get_progression(&self) -> Result<ProgressionSnapshot> {
            let next = self.script.lock().unwrap().pop_front();
            let (delay, snapshot) =
                next.ok_or_else(|| HubError::internal("script exhausted"))?;
            tokio::time::sleep(delay).await;
            Ok(snapshot)
        }

        async fn award_xp(&self, _amount: i64) -> Result<ProgressionSnapshot> {
            Err(HubError::internal("unused"))
        }

        async fn reset_progression(&self) -> Result<ProgressionSnapshot> {
            Err(HubError::internal("unused"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_users_never_shows_previous_snapshot() {
        let first_user = snapshot(9, 150);
        let second_user = snapshot(1, 20);
        let service = Arc::new(ScriptedProgression {
            script: Mutex::new(VecDeque::from([
                (Duration::from_secs(5), first_user.clone()),
                (Duration::from_millis(100), second_user.clone()),
            ])),
        });
        let (tx, rx) = watch::channel(SessionState::authenticated(user("a")));
        let provider = Arc::new(ProgressionProvider::new(service, rx.clone()));

        let observed = Arc::new(Mutex::new(Vec::new()));
        let mut updates = provider.subscribe();
        tokio::spawn({
            let observed = observed.clone();
            async move {
                while updates.changed().await.is_ok() {
                    let snapshot = updates.borrow_and_update().snapshot.clone();
                    observed.lock().unwrap().push(snapshot);
                }
            }
        });

        let cancel = CancellationToken::new();
        let listener = IdentityListener::spawn(
            rx,
            vec![provider.clone() as Arc<dyn IdentityBound>],
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send_replace(SessionState::authenticated(user("b")));
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(provider.snapshot(), Some(second_user));
        assert!(
            !observed
                .lock()
                .unwrap()
                .iter()
                .any(|s| s.as_ref() == Some(&first_user))
        );

        cancel.cancel();
        listener.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_anonymous_visit_settles_without_provider_calls() {
        let store = SessionStore::new(Arc::new(MockAuthService::new(Err(
            HubError::Unauthenticated,
        ))));
        let progression_service = Arc::new(MockProgressionService::new(snapshot(1, 0)));
        let balance_service = Arc::new(MockBalanceService::new(Ok(None)));
        let progression = Arc::new(ProgressionProvider::new(
            progression_service.clone(),
            store.subscribe(),
        ));
        let balance = Arc::new(BalanceProvider::new(balance_service.clone(), store.subscribe()));

        let cancel = CancellationToken::new();
        let mut listener = IdentityListener::spawn(
            store.subscribe(),
            vec![
                progression.clone() as Arc<dyn IdentityBound>,
                balance.clone() as Arc<dyn IdentityBound>,
            ],
            cancel.clone(),
        );
        store.initialize().await;
        assert!(listener.wait_for_dispatch().await);
        assert_eq!(listener.last_dispatched(), Some(None));

        assert!(!store.is_loading());
        assert_eq!(progression.state(), ProviderState::default());
        assert_eq!(balance.state(), ProviderState::default());
        assert_eq!(progression_service.fetch_count(), 0);
        assert_eq!(balance_service.fetch_count(), 0);

        cancel.cancel();
        listener.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_triggers_fetch_and_logout_resets() {
        let auth = Arc::new(MockAuthService::new(Ok(user("1"))));
        let store = SessionStore::new(auth);
        let service = Arc::new(MockProgressionService::new(snapshot(2, 40)));
        let provider = Arc::new(ProgressionProvider::new(service.clone(), store.subscribe()));
        let cancel = CancellationToken::new();
        let listener = IdentityListener::spawn(
            store.subscribe(),
            vec![provider.clone() as Arc<dyn IdentityBound>],
            cancel.clone(),
        );

        store.initialize().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(provider.snapshot(), Some(snapshot(2, 40)));
        assert_eq!(service.fetch_count(), 1);

        // Same identity again: no reset, no refetch.
        store.refresh().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(service.fetch_count(), 1);

        store.logout().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(provider.state(), ProviderState::default());

        cancel.cancel();
        listener.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_returning_to_user_after_interrupted_switch_refetches() {
        let first_visit = snapshot(3, 10);
        let return_visit = snapshot(3, 60);
        let service = ScriptedProgression::new([
            (Duration::from_millis(100), first_visit.clone()),
            (Duration::from_secs(5), snapshot(7, 0)),
            (Duration::from_millis(100), return_visit.clone()),
        ]);
        let (tx, rx) = watch::channel(SessionState::authenticated(user("a")));
        let provider = Arc::new(ProgressionProvider::new(service.clone(), rx.clone()));
        let cancel = CancellationToken::new();
        let listener = IdentityListener::spawn(
            rx,
            vec![provider.clone() as Arc<dyn IdentityBound>],
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(provider.snapshot(), Some(first_visit));

        tx.send_replace(SessionState::authenticated(user("b")));
        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send_replace(SessionState::authenticated(user("a")));
        tokio::time::sleep(Duration::from_secs(30)).await;

        let state = provider.state();
        assert_eq!(state.snapshot, Some(return_visit));
        assert!(!state.is_loading);
        assert_eq!(service.remaining(), 0);
        assert_eq!(listener.last_dispatched(), Some(Some("a".to_string())));

        cancel.cancel();
        listener.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_profile_update_during_fetch_keeps_dispatch_running() {
        let fetched = snapshot(4, 80);
        let service = ScriptedProgression::new([
            (Duration::from_secs(5), fetched.clone()),
            (Duration::from_millis(100), snapshot(1, 0)),
        ]);
        let (tx, rx) = watch::channel(SessionState::authenticated(user("a")));
        let provider = Arc::new(ProgressionProvider::new(service.clone(), rx.clone()));

        let resets = Arc::new(Mutex::new(0usize));
        let mut updates = provider.subscribe();
        tokio::spawn({
            let resets = resets.clone();
            async move {
                while updates.changed().await.is_ok() {
                    if *updates.borrow_and_update() == ProviderState::default() {
                        *resets.lock().unwrap() += 1;
                    }
                }
            }
        });

        let cancel = CancellationToken::new();
        let listener = IdentityListener::spawn(
            rx,
            vec![provider.clone() as Arc<dyn IdentityBound>],
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        let resets_before = *resets.lock().unwrap();
        let mut updated = user("a");
        updated.avatar_url = Some("https://cdn.example.org/new.png".to_string());
        tx.send_replace(SessionState::authenticated(updated));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(provider.state().is_loading);
        assert_eq!(*resets.lock().unwrap(), resets_before);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(provider.snapshot(), Some(fetched));
        assert_eq!(service.remaining(), 1);

        cancel.cancel();
        listener.join().await.unwrap();
    }
}
