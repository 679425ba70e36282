//! HTTP implementation of `AuthService`.

use async_trait::async_trait;
use guildhall_core::HubError;
use guildhall_core::error::Result;
use guildhall_core::session::{AuthService, Session};

use crate::http::ApiClient;

pub const CURRENT_USER_PATH: &str = "/api/v1/users/me";
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";

/// Restores the session from the cookie jar and ends it on logout.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn current_user(&self) -> Result<Session> {
        self.api.send_json(self.api.get(CURRENT_USER_PATH)).await
    }

    async fn logout(&self) -> Result<()> {
        match self.api.send_empty(self.api.post(LOGOUT_PATH)).await {
            // Already logged out server-side.
            Err(HubError::Unauthenticated) => Ok(()),
            other => other,
        }
    }
}
