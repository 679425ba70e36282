//! Currency balance of the current user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub balance: i64,
}

#[async_trait]
pub trait BalanceService: Send + Sync {
    /// Fetches the balance.
    ///
    /// An unauthorized response is not an error here: it yields `Ok(None)`.
    async fn get_balance(&self) -> Result<Option<BalanceSnapshot>>;
}
