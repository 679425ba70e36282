//! API health probe.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.to_ascii_lowercase().as_str(), "ok" | "healthy")
    }
}

/// The only service with an explicit request timeout.
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Probes the API. Exceeding the timeout yields a transient `Network` error.
    async fn check(&self) -> Result<HealthStatus>;
}
