//! Shared HTTP client for every service wrapper.

use std::sync::Arc;

use guildhall_core::HubError;
use guildhall_core::config::ApiConfig;
use reqwest::cookie::Jar;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::error::{ensure_success, transport_error};

/// Thin wrapper over `reqwest::Client` bound to one API base URL.
///
/// The client carries a cookie jar, so session cookies set by the API (or
/// seeded from configuration) accompany every session-scoped request.
/// Cloning is cheap and shares the jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Config` if the base URL does not parse or the
    /// underlying client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, HubError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            HubError::config(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.session_cookie {
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(pair, &base_url);
            }
            tracing::debug!("[ApiClient] Seeded cookie jar for {}", base_url);
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .build()
            .map_err(|e| HubError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins a static API path such as `/api/v1/files/` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Builds a URL from path segments, percent-encoding each one.
    pub fn url_with_segments(&self, segments: &[&str]) -> Result<Url, HubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                HubError::config(format!("API base URL '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    pub fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    /// Sends a request and fails on any non-2xx status.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, HubError> {
        let response = request.send().await.map_err(transport_error)?;
        ensure_success(response).await
    }

    /// Sends a request and decodes the JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, HubError> {
        let response = self.send(request).await?;
        let body = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&body).map_err(HubError::from)
    }

    /// Sends a request whose response body is irrelevant.
    pub async fn send_empty(&self, request: RequestBuilder) -> Result<(), HubError> {
        self.send(request).await.map(|_| ())
    }
}
