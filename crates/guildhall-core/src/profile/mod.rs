//! Public user profiles.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub awarded_at: Option<DateTime<Utc>>,
}

/// What any visitor can see about a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub background_url: Option<String>,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub total_xp: i64,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Looks a profile up by username or id.
    ///
    /// A 404 surfaces as `HubError::NotFound { entity_type: "User", .. }`.
    async fn get_profile(&self, identifier: &str) -> Result<PublicProfile>;
}
