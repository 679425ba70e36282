//! Background preference.
//!
//! Not fetched: the stored background arrives with the session record and
//! the override only lives for this UI session.

use async_trait::async_trait;
use guildhall_core::background::{BackgroundOverride, resolve_background};
use guildhall_core::session::{Session, SessionState};
use tokio::sync::watch;

use super::identity::IdentityBound;

pub struct BackgroundProvider {
    session: watch::Receiver<SessionState>,
    override_choice: watch::Sender<BackgroundOverride>,
}

impl BackgroundProvider {
    pub fn new(session: watch::Receiver<SessionState>) -> Self {
        let (override_choice, _) = watch::channel(BackgroundOverride::Unset);
        Self {
            session,
            override_choice,
        }
    }

    /// Override if set, else the session's stored background, else none.
    pub fn active_background(&self) -> Option<String> {
        let choice = self.override_choice.borrow();
        let session = self.session.borrow();
        resolve_background(&choice, session.user.as_ref())
    }

    /// `None` forces the theme default even if the session has a background.
    pub fn set_override(&self, background: Option<String>) {
        tracing::debug!("[BackgroundProvider] Override set to {:?}", background);
        self.override_choice.send_replace(BackgroundOverride::Set(background));
    }

    pub fn clear_override(&self) {
        self.override_choice.send_replace(BackgroundOverride::Unset);
    }

    pub fn override_choice(&self) -> BackgroundOverride {
        self.override_choice.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BackgroundOverride> {
        self.override_choice.subscribe()
    }
}

#[async_trait]
impl IdentityBound for BackgroundProvider {
    fn name(&self) -> &'static str {
        "background"
    }

    async fn on_identity_change(&self, _session: Option<&Session>) {
        self.clear_override();
    }
}
