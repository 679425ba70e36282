//! HTTP implementation of `BalanceService`.

use async_trait::async_trait;
use guildhall_core::HubError;
use guildhall_core::balance::{BalanceService, BalanceSnapshot};
use guildhall_core::error::Result;

use crate::http::ApiClient;

pub const BALANCE_PATH: &str = "/api/v1/users/me/balance";

#[derive(Debug, Clone)]
pub struct HttpBalanceService {
    api: ApiClient,
}

impl HttpBalanceService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BalanceService for HttpBalanceService {
    async fn get_balance(&self) -> Result<Option<BalanceSnapshot>> {
        match self.api.send_json(self.api.get(BALANCE_PATH)).await {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(HubError::Unauthenticated) => {
                tracing::debug!("[Balance] Not logged in, no balance");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
