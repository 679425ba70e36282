use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use guildhall_application::{
    BackgroundProvider, BalanceProvider, FileActions, IdentityBound, IdentityListener,
    MaintenanceGate, ProgressionProvider, SessionStore, ShopActions,
};
use guildhall_core::config::HubConfig;
use guildhall_infrastructure::{
    ApiClient, HttpAuthService, HttpBalanceService, HttpFileService, HttpHealthService,
    HttpNotificationService, HttpProfileService, HttpProgressionService, HttpShopService,
};
use tokio_util::sync::CancellationToken;

use crate::app::AppState;

pub struct AppBootstrap {
    pub app_state: AppState,
}

impl AppBootstrap {
    /// Builds every service and provider, then restores the session.
    ///
    /// Returns once the providers have reacted to the restored identity, so
    /// commands can read their snapshots directly.
    pub async fn init(config: HubConfig) -> Result<Self> {
        tracing::info!("[Bootstrap] Using API at {}", config.api.base_url);

        let api = ApiClient::new(&config.api).context("Failed to build HTTP client")?;

        let session_store = Arc::new(SessionStore::new(Arc::new(HttpAuthService::new(
            api.clone(),
        ))));
        let progression = Arc::new(ProgressionProvider::new(
            Arc::new(HttpProgressionService::new(api.clone())),
            session_store.subscribe(),
        ));
        let balance = Arc::new(BalanceProvider::new(
            Arc::new(HttpBalanceService::new(api.clone())),
            session_store.subscribe(),
        ));
        let background = Arc::new(BackgroundProvider::new(session_store.subscribe()));

        let file_service = Arc::new(HttpFileService::new(api.clone()));
        let shop_service = Arc::new(HttpShopService::new(api.clone()));
        let notification_service = Arc::new(HttpNotificationService::new(api.clone()));
        let profile_service = Arc::new(HttpProfileService::new(api.clone()));
        let health_service = Arc::new(HttpHealthService::new(
            api,
            Duration::from_secs(config.api.health_timeout_secs),
        ));

        let cancel = CancellationToken::new();
        let bound: Vec<Arc<dyn IdentityBound>> = vec![
            progression.clone() as Arc<dyn IdentityBound>,
            balance.clone() as Arc<dyn IdentityBound>,
            background.clone() as Arc<dyn IdentityBound>,
        ];
        let mut identity_listener =
            IdentityListener::spawn(session_store.subscribe(), bound, cancel.clone());

        session_store.initialize().await;
        if !identity_listener.wait_for_dispatch().await {
            tracing::warn!("[Bootstrap] Identity listener stopped before first dispatch");
        }
        tracing::info!(
            "[Bootstrap] Session restored: authenticated={}",
            session_store.is_authenticated()
        );

        let app_state = AppState {
            maintenance_gate: MaintenanceGate::new(config.features.maintenance_mode),
            shop_actions: ShopActions::new(shop_service.clone(), balance.clone()),
            file_actions: FileActions::new(file_service.clone(), progression.clone()),
            config,
            session_store,
            progression,
            balance,
            background,
            notification_service,
            file_service,
            shop_service,
            profile_service,
            health_service,
            cancel,
            identity_listener,
        };

        Ok(Self { app_state })
    }
}
