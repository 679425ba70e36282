//! HTTP implementation of `NotificationService`.

use async_trait::async_trait;
use guildhall_core::HubError;
use guildhall_core::error::Result;
use guildhall_core::notification::{
    Notification, NotificationPage, NotificationService, clamp_limit,
};
use reqwest::Method;
use serde::Deserialize;

use crate::http::ApiClient;

pub const RECENT_PATH: &str = "/api/v1/notifications/recent";
pub const LIST_PATH: &str = "/api/v1/notifications";

/// The list endpoint has answered both bare arrays and `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListBody {
    Plain(Vec<Notification>),
    Wrapped { items: Vec<Notification> },
}

impl ListBody {
    fn into_items(self) -> Vec<Notification> {
        match self {
            ListBody::Plain(items) | ListBody::Wrapped { items } => items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpNotificationService {
    api: ApiClient,
}

impl HttpNotificationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NotificationService for HttpNotificationService {
    async fn recent(&self) -> Result<Vec<Notification>> {
        match self.api.send_json::<ListBody>(self.api.get(RECENT_PATH)).await {
            Ok(body) => Ok(body.into_items()),
            Err(HubError::Unauthenticated) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<NotificationPage> {
        let limit = clamp_limit(limit);
        let request = self
            .api
            .get(LIST_PATH)
            .query(&[("skip", skip), ("limit", limit)]);
        let body: ListBody = self.api.send_json(request).await?;
        Ok(NotificationPage::new(body.into_items(), skip, limit))
    }

    async fn mark_read(&self, notification_id: i64) -> Result<()> {
        let id = notification_id.to_string();
        let url = self
            .api
            .url_with_segments(&["api", "v1", "notifications", &id, "read"])?;
        self.api
            .send_empty(self.api.request_url(Method::POST, url))
            .await
            .map_err(|e| crate::http::error::not_found_as(e, "Notification", &id))
    }
}
