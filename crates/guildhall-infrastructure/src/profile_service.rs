//! HTTP implementation of `ProfileService`.

use async_trait::async_trait;
use guildhall_core::error::Result;
use guildhall_core::profile::{ProfileService, PublicProfile};
use reqwest::Method;

use crate::http::ApiClient;
use crate::http::error::not_found_as;

#[derive(Debug, Clone)]
pub struct HttpProfileService {
    api: ApiClient,
}

impl HttpProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn get_profile(&self, identifier: &str) -> Result<PublicProfile> {
        let url = self
            .api
            .url_with_segments(&["api", "v1", "users", identifier, "profile"])?;
        self.api
            .send_json(self.api.request_url(Method::GET, url))
            .await
            .map_err(|e| not_found_as(e, "User", identifier))
    }
}
