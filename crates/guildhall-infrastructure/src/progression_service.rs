//! HTTP implementation of `ProgressionService`.

use async_trait::async_trait;
use guildhall_core::error::Result;
use guildhall_core::progression::{ProgressionService, ProgressionSnapshot};
use serde::Serialize;
use serde_json::Value;

use crate::http::ApiClient;
use crate::http::error::debug_endpoint_error;

pub const PROGRESSION_PATH: &str = "/api/v1/users/me/progression";
pub const AWARD_XP_PATH: &str = "/api/v1/users/me/award-xp";
pub const RESET_PROGRESSION_PATH: &str = "/api/v1/users/me/reset-progression";

const AWARD_FEATURE: &str = "XP award";
const RESET_FEATURE: &str = "Progression reset";

#[derive(Debug, Serialize)]
struct AwardXpRequest {
    amount: i64,
}

#[derive(Debug, Clone)]
pub struct HttpProgressionService {
    api: ApiClient,
}

impl HttpProgressionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// Mutation responses either are the snapshot or wrap it in `progression`.
fn snapshot_from_mutation(body: Value) -> Result<ProgressionSnapshot> {
    let snapshot = match body.get("progression") {
        Some(inner) => serde_json::from_value(inner.clone())?,
        None => serde_json::from_value(body)?,
    };
    Ok(snapshot)
}

#[async_trait]
impl ProgressionService for HttpProgressionService {
    async fn get_progression(&self) -> Result<ProgressionSnapshot> {
        self.api.send_json(self.api.get(PROGRESSION_PATH)).await
    }

    async fn award_xp(&self, amount: i64) -> Result<ProgressionSnapshot> {
        let request = self.api.post(AWARD_XP_PATH).json(&AwardXpRequest { amount });
        let body: Value = self
            .api
            .send_json(request)
            .await
            .map_err(|e| debug_endpoint_error(e, AWARD_FEATURE))?;
        snapshot_from_mutation(body)
    }

    async fn reset_progression(&self) -> Result<ProgressionSnapshot> {
        let body: Value = self
            .api
            .send_json(self.api.post(RESET_PROGRESSION_PATH))
            .await
            .map_err(|e| debug_endpoint_error(e, RESET_FEATURE))?;
        snapshot_from_mutation(body)
    }
}
