use std::sync::Arc;

use guildhall_application::{
    BackgroundProvider, BalanceProvider, FileActions, ListenerHandle, MaintenanceGate,
    ProgressionProvider, SessionStore, ShopActions,
};
use guildhall_core::config::HubConfig;
use guildhall_core::files::FileService;
use guildhall_core::health::HealthService;
use guildhall_core::notification::NotificationService;
use guildhall_core::profile::ProfileService;
use guildhall_core::shop::ShopService;
use tokio_util::sync::CancellationToken;

/// Application state shared by every command.
pub struct AppState {
    pub config: HubConfig,
    pub session_store: Arc<SessionStore>,
    pub progression: Arc<ProgressionProvider>,
    pub balance: Arc<BalanceProvider>,
    pub background: Arc<BackgroundProvider>,
    pub notification_service: Arc<dyn NotificationService>,
    pub file_service: Arc<dyn FileService>,
    pub shop_service: Arc<dyn ShopService>,
    pub profile_service: Arc<dyn ProfileService>,
    pub health_service: Arc<dyn HealthService>,
    pub shop_actions: ShopActions,
    pub file_actions: FileActions,
    pub maintenance_gate: MaintenanceGate,
    pub cancel: CancellationToken,
    pub identity_listener: ListenerHandle,
}

impl AppState {
    /// Stops background tasks and waits for the identity listener to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.identity_listener.join().await {
            tracing::warn!("[AppState] Identity listener ended abnormally: {}", e);
        }
    }
}
