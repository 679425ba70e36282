//! Progression service trait.

use async_trait::async_trait;

use super::model::ProgressionSnapshot;
use crate::error::Result;

/// Remote progression operations for the current user.
///
/// `award_xp` and `reset_progression` are debug-only on the server. When the
/// environment does not expose them, implementations return
/// `HubError::FeatureUnavailable` instead of a generic failure.
#[async_trait]
pub trait ProgressionService: Send + Sync {
    async fn get_progression(&self) -> Result<ProgressionSnapshot>;

    /// Awards `amount` XP and returns the snapshot the server reported.
    async fn award_xp(&self, amount: i64) -> Result<ProgressionSnapshot>;

    /// Resets level and XP to the initial values.
    async fn reset_progression(&self) -> Result<ProgressionSnapshot>;
}
