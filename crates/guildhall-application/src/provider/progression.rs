//! Level and XP of the current user.

use std::sync::Arc;

use async_trait::async_trait;
use guildhall_core::error::{HubError, Result};
use guildhall_core::progression::{ProgressionService, ProgressionSnapshot};
use guildhall_core::session::{Session, SessionState};
use tokio::sync::watch;

use super::cell::{ProviderState, SnapshotCell, Ticket};
use super::identity::IdentityBound;

pub struct ProgressionProvider {
    service: Arc<dyn ProgressionService>,
    session: watch::Receiver<SessionState>,
    cell: SnapshotCell<ProgressionSnapshot>,
}

impl ProgressionProvider {
    pub fn new(
        service: Arc<dyn ProgressionService>,
        session: watch::Receiver<SessionState>,
    ) -> Self {
        Self {
            service,
            session,
            cell: SnapshotCell::new(),
        }
    }

    pub fn state(&self) -> ProviderState<ProgressionSnapshot> {
        self.cell.state()
    }

    pub fn snapshot(&self) -> Option<ProgressionSnapshot> {
        self.cell.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProviderState<ProgressionSnapshot>> {
        self.cell.subscribe()
    }

    fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    /// Re-fetches the snapshot. Does nothing while logged out.
    pub async fn refresh(&self) {
        if !self.is_authenticated() {
            tracing::debug!("[ProgressionProvider] No session, skipping refresh");
            return;
        }

        let ticket = self.cell.begin();
        match self.service.get_progression().await {
            Ok(snapshot) => {
                if !self.cell.succeed(ticket, Some(snapshot)) {
                    tracing::debug!("[ProgressionProvider] Discarded stale progression response");
                }
            }
            Err(e) => {
                if e.is_unauthenticated() {
                    tracing::debug!("[ProgressionProvider] Progression fetch unauthorized");
                } else {
                    tracing::warn!("[ProgressionProvider] Failed to fetch progression: {}", e);
                }
                self.cell.fail(ticket, e.to_string());
            }
        }
    }

    /// Awards XP (debug endpoint), then confirms against the server.
    pub async fn add_xp(&self, amount: i64) -> Result<()> {
        self.ensure_authenticated()?;
        tracing::info!("[ProgressionProvider] Awarding {} XP", amount);
        let ticket = self.cell.begin();
        let outcome = self.service.award_xp(amount).await;
        self.adopt(ticket, outcome).await
    }

    /// Resets level and XP (debug endpoint), then confirms against the server.
    pub async fn reset_level(&self) -> Result<()> {
        self.ensure_authenticated()?;
        tracing::info!("[ProgressionProvider] Resetting progression");
        let ticket = self.cell.begin();
        let outcome = self.service.reset_progression().await;
        self.adopt(ticket, outcome).await
    }

    fn ensure_authenticated(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(HubError::Unauthenticated)
        }
    }

    async fn adopt(&self, ticket: Ticket, outcome: Result<ProgressionSnapshot>) -> Result<()> {
        match outcome {
            Ok(snapshot) => {
                // Optimistic: show what the mutation returned until the refresh lands.
                self.cell.succeed(ticket, Some(snapshot));
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[ProgressionProvider] Progression mutation failed: {}", e);
                self.cell.settle(ticket);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl IdentityBound for ProgressionProvider {
    fn name(&self) -> &'static str {
        "progression"
    }

    async fn on_identity_change(&self, session: Option<&Session>) {
        self.cell.reset();
        if session.is_some() {
            self.refresh().await;
        }
    }
}
