//! Session domain model.
//!
//! A `Session` is the authenticated identity of the current visitor, as
//! returned by the current-user endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// The authenticated user record and role flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Server-side user identifier
    #[serde(rename = "id", alias = "user_id", deserialize_with = "string_or_number")]
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_super_admin: bool,
    /// Background the user has equipped, persisted server-side.
    #[serde(default)]
    pub background_url: Option<String>,
}

impl Session {
    /// Super admins are implicitly admins.
    pub fn has_admin_rights(&self) -> bool {
        self.is_admin || self.is_super_admin
    }
}

/// Accepts both `"42"` and `42` for identifiers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// The value broadcast by the session store to every subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<Session>,
    pub is_loading: bool,
}

impl SessionState {
    /// State before the silent restore has resolved.
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    pub fn authenticated(user: Session) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Identity key that providers compare to detect a user switch.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.user_id.as_str())
    }
}
