//! Background polling of the recent-notifications endpoint.

use std::sync::Arc;
use std::time::Duration;

use guildhall_core::notification::{Notification, NotificationService};
use guildhall_core::session::SessionState;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Latest poll result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecentNotifications {
    pub items: Vec<Notification>,
    /// Error of the last poll, if it failed. Items from the previous poll are kept.
    pub error: Option<String>,
}

impl RecentNotifications {
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }
}

pub struct NotificationPoller {
    service: Arc<dyn NotificationService>,
    interval: Duration,
}

impl NotificationPoller {
    pub fn new(service: Arc<dyn NotificationService>, interval: Duration) -> Self {
        Self {
            service,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    pub fn spawn(&self, session: watch::Receiver<SessionState>) -> PollerHandle {
        self.spawn_with_token(session, CancellationToken::new())
    }

    /// Starts polling immediately, then once per interval.
    ///
    /// The task stops when `cancel` fires or the session becomes
    /// unauthenticated.
    pub fn spawn_with_token(
        &self,
        mut session: watch::Receiver<SessionState>,
        cancel: CancellationToken,
    ) -> PollerHandle {
        let (publisher, receiver) = watch::channel(RecentNotifications::default());
        let service = self.service.clone();
        let period = self.interval;
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!("[NotificationPoller] Started ({}s interval)", period.as_secs());
            let mut polled_for = session.borrow_and_update().user_id().map(str::to_string);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("[NotificationPoller] Cancelled");
                        break;
                    }
                    changed = session.changed() => {
                        let logged_out = changed.is_err() || {
                            let state = session.borrow_and_update();
                            !state.is_loading && !state.is_authenticated()
                        };
                        if logged_out {
                            tracing::debug!("[NotificationPoller] Session ended, stopping");
                            publisher.send_replace(RecentNotifications::default());
                            break;
                        }
                        let current = session.borrow().user_id().map(str::to_string);
                        if current.is_some() && current != polled_for {
                            if polled_for.is_some() {
                                tracing::debug!("[NotificationPoller] User changed to {:?}, clearing", current);
                                publisher.send_replace(RecentNotifications::default());
                            }
                            polled_for = current;
                        }
                    }
                    _ = ticker.tick() => {
                        let requested = session.borrow().user_id().map(str::to_string);
                        if requested.is_none() {
                            continue;
                        }
                        let outcome = service.recent().await;
                        if session.borrow().user_id() != requested.as_deref() {
                            // Belongs to the previous user.
                            continue;
                        }
                        match outcome {
                            Ok(items) => {
                                publisher.send_replace(RecentNotifications { items, error: None });
                            }
                            Err(e) => {
                                tracing::warn!("[NotificationPoller] Poll failed: {}", e);
                                publisher.send_modify(|latest| latest.error = Some(e.to_string()));
                            }
                        }
                    }
                }
            }
        });

        PollerHandle {
            cancel,
            handle: Some(handle),
            receiver,
        }
    }
}

/// Owning handle of a running poller. Dropping it stops the task.
pub struct PollerHandle {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    receiver: watch::Receiver<RecentNotifications>,
}

impl PollerHandle {
    pub fn latest(&self) -> RecentNotifications {
        self.receiver.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RecentNotifications> {
        self.receiver.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Cancels the task and waits for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("[NotificationPoller] Task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
