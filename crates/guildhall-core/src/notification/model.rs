//! Notification models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard upper bound the API accepts for `limit`.
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// Free-form category such as `badge_awarded` or `order_shipped`.
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A page of the notification history.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPage {
    pub items: Vec<Notification>,
    /// Offset this page was requested with.
    pub skip: u32,
    /// Effective (clamped) limit this page was requested with.
    pub limit: u32,
    /// True when the page came back full, so another page may follow.
    pub has_more: bool,
}

impl NotificationPage {
    /// Builds a page, deriving `has_more` from the item count.
    ///
    /// A page is the last one when it holds strictly fewer items than requested.
    pub fn new(items: Vec<Notification>, skip: u32, limit: u32) -> Self {
        let has_more = items.len() >= limit as usize && limit > 0;
        Self {
            items,
            skip,
            limit,
            has_more,
        }
    }

    /// Offset of the page following this one.
    pub fn next_skip(&self) -> u32 {
        self.skip + self.items.len() as u32
    }
}

/// Clamps a requested page size into `1..=MAX_PAGE_LIMIT`.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_PAGE_LIMIT)
}
