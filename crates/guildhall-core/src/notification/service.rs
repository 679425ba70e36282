//! Notification service trait.

use async_trait::async_trait;

use super::model::{Notification, NotificationPage};
use crate::error::Result;

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Latest notifications for the header bell.
    ///
    /// An unauthorized response yields an empty list, not an error.
    async fn recent(&self) -> Result<Vec<Notification>>;

    /// One page of the notification history. `limit` is clamped to `1..=100`.
    async fn list(&self, skip: u32, limit: u32) -> Result<NotificationPage>;

    async fn mark_read(&self, notification_id: i64) -> Result<()>;
}
