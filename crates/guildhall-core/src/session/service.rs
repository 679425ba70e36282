//! Authentication service trait.
//!
//! Defines the interface the session store uses to restore and end a session.

use async_trait::async_trait;

use super::model::Session;
use crate::error::Result;

/// Remote authentication operations.
///
/// Implementations carry the session credentials (cookies) themselves; callers
/// never pass tokens explicitly.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Fetches the current user record.
    ///
    /// # Returns
    ///
    /// - `Ok(Session)`: a valid session exists
    /// - `Err(HubError::Unauthenticated)`: no session or it expired
    /// - `Err(_)`: transport or server failure
    async fn current_user(&self) -> Result<Session>;

    /// Ends the server-side session.
    async fn logout(&self) -> Result<()>;
}
