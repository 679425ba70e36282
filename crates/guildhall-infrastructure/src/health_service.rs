//! HTTP implementation of `HealthService`.

use std::time::Duration;

use async_trait::async_trait;
use guildhall_core::error::Result;
use guildhall_core::health::{HealthService, HealthStatus};

use crate::http::ApiClient;

pub const HEALTH_PATH: &str = "/api/v1/health";

#[derive(Debug, Clone)]
pub struct HttpHealthService {
    api: ApiClient,
    timeout: Duration,
}

impl HttpHealthService {
    pub fn new(api: ApiClient, timeout: Duration) -> Self {
        Self { api, timeout }
    }
}

#[async_trait]
impl HealthService for HttpHealthService {
    async fn check(&self) -> Result<HealthStatus> {
        let request = self.api.get(HEALTH_PATH).timeout(self.timeout);
        self.api.send_json(request).await
    }
}
