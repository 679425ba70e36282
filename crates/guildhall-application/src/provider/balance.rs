//! Currency balance of the current user.

use std::sync::Arc;

use async_trait::async_trait;
use guildhall_core::balance::{BalanceService, BalanceSnapshot};
use guildhall_core::session::{Session, SessionState};
use tokio::sync::watch;

use super::cell::{ProviderState, SnapshotCell};
use super::identity::IdentityBound;

pub struct BalanceProvider {
    service: Arc<dyn BalanceService>,
    session: watch::Receiver<SessionState>,
    cell: SnapshotCell<BalanceSnapshot>,
}

impl BalanceProvider {
    pub fn new(service: Arc<dyn BalanceService>, session: watch::Receiver<SessionState>) -> Self {
        Self {
            service,
            session,
            cell: SnapshotCell::new(),
        }
    }

    pub fn state(&self) -> ProviderState<BalanceSnapshot> {
        self.cell.state()
    }

    pub fn balance(&self) -> Option<i64> {
        self.cell.snapshot().map(|s| s.balance)
    }

    pub fn subscribe(&self) -> watch::Receiver<ProviderState<BalanceSnapshot>> {
        self.cell.subscribe()
    }

    /// Re-fetches the balance.
    ///
    /// Unauthorized means "no balance" and is not recorded as an error.
    pub async fn refresh(&self) {
        if !self.session.borrow().is_authenticated() {
            tracing::debug!("[BalanceProvider] No session, skipping refresh");
            return;
        }

        let ticket = self.cell.begin();
        match self.service.get_balance().await {
            Ok(balance) => {
                self.cell.succeed(ticket, balance);
            }
            Err(e) if e.is_unauthenticated() => {
                tracing::debug!("[BalanceProvider] Balance unauthorized, treating as empty");
                self.cell.succeed(ticket, None);
            }
            Err(e) => {
                tracing::warn!("[BalanceProvider] Failed to fetch balance: {}", e);
                self.cell.fail(ticket, e.to_string());
            }
        }
    }
}

#[async_trait]
impl IdentityBound for BalanceProvider {
    fn name(&self) -> &'static str {
        "balance"
    }

    async fn on_identity_change(&self, session: Option<&Session>) {
        self.cell.reset();
        if session.is_some() {
            self.refresh().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBalanceService, session_channel};
    use guildhall_core::error::HubError;

    #[tokio::test]
    async fn test_unauthorized_is_no_balance_without_error() {
        let service = Arc::new(MockBalanceService::new(Ok(None)));
        let (_tx, rx) = session_channel("1");
        let provider = BalanceProvider::new(service, rx);

        provider.refresh().await;

        let state = provider.state();
        assert_eq!(provider.balance(), None);
        assert!(state.error.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_server_error_keeps_previous_balance() {
        let service = Arc::new(MockBalanceService::new(Ok(Some(BalanceSnapshot {
            balance: 120,
        }))));
        let (_tx, rx) = session_channel("1");
        let provider = BalanceProvider::new(service.clone(), rx);
        provider.refresh().await;
        assert_eq!(provider.balance(), Some(120));

        service.set_response(Err(HubError::api(500, "Error 500: Internal Server Error")));
        provider.refresh().await;

        let state = provider.state();
        assert_eq!(provider.balance(), Some(120));
        assert_eq!(
            state.error.as_deref(),
            Some("Error 500: Internal Server Error")
        );
    }
}
