//! Offset-based paging through the notification history.

use std::collections::HashSet;
use std::sync::Arc;

use guildhall_core::error::Result;
use guildhall_core::notification::{Notification, NotificationService, clamp_limit};

pub struct NotificationPager {
    service: Arc<dyn NotificationService>,
    limit: u32,
    skip: u32,
    items: Vec<Notification>,
    has_more: bool,
    error: Option<String>,
}

impl NotificationPager {
    pub fn new(service: Arc<dyn NotificationService>, limit: u32) -> Self {
        Self {
            service,
            limit: clamp_limit(limit),
            skip: 0,
            items: Vec::new(),
            has_more: true,
            error: None,
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Offset the next page will be requested with.
    pub fn skip(&self) -> u32 {
        self.skip
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetches the next page and appends it.
    ///
    /// Returns how many new notifications were added. Items already loaded
    /// (a notification can shift pages when new ones arrive) are skipped.
    pub async fn load_next(&mut self) -> Result<usize> {
        if !self.has_more {
            return Ok(0);
        }

        let page = match self.service.list(self.skip, self.limit).await {
            Ok(page) => page,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.skip = page.next_skip();
        self.has_more = page.has_more;
        self.error = None;

        let mut seen: HashSet<i64> = self.items.iter().map(|n| n.id).collect();
        let before = self.items.len();
        self.items
            .extend(page.items.into_iter().filter(|n| seen.insert(n.id)));
        let added = self.items.len() - before;

        tracing::debug!(
            "[NotificationPager] Loaded {} notifications (skip now {}, has_more={})",
            added,
            self.skip,
            self.has_more
        );
        Ok(added)
    }

    /// Marks one notification as read and updates the loaded copy.
    pub async fn mark_read(&mut self, notification_id: i64) -> Result<()> {
        self.service.mark_read(notification_id).await?;
        if let Some(item) = self.items.iter_mut().find(|n| n.id == notification_id) {
            item.is_read = true;
        }
        Ok(())
    }

    /// Drops everything loaded and starts again from the first page.
    pub fn reset(&mut self) {
        self.skip = 0;
        self.items.clear();
        self.has_more = true;
        self.error = None;
    }
}
