//! Error types for the Guildhall client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every service wrapper and provider.
///
/// Service wrappers return these; providers and views catch them at the
/// boundary and keep only the human-readable message.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HubError {
    /// No authenticated session (HTTP 401 or no cookie).
    #[error("Please log in to continue")]
    Unauthenticated,

    /// The session is valid but lacks the required role (HTTP 403).
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found with type information
    #[error("{entity_type} not found: '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A debug-only endpoint that the current environment does not expose.
    #[error("{feature} is not available in this environment")]
    FeatureUnavailable { feature: &'static str },

    /// Non-2xx response with a server-provided or synthesized message.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport failure (connection refused, DNS, timeout).
    #[error("Network error: {message}")]
    Network { message: String, is_timeout: bool },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by views to pick a rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expected; render a "please log in" affordance.
    AuthenticationAbsent,
    /// Redirect away instead of showing an error banner.
    AuthorizationDenied,
    /// Show inline with a retry affordance, keep prior data visible.
    Transient,
    /// Map to a per-resource human message.
    NotFound,
    /// Debug endpoint disabled; not a failure.
    FeatureUnavailable,
    /// Structured server/validation message, surfaced verbatim.
    Server,
}

impl HubError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Api error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>, is_timeout: bool) -> Self {
        Self::Network {
            message: message.into(),
            is_timeout,
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_feature_unavailable(&self) -> bool {
        matches!(self, Self::FeatureUnavailable { .. })
    }

    /// Returns the HTTP status that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true when retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthenticated => ErrorCategory::AuthenticationAbsent,
            Self::Forbidden(_) => ErrorCategory::AuthorizationDenied,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::FeatureUnavailable { .. } => ErrorCategory::FeatureUnavailable,
            err if err.is_transient() => ErrorCategory::Transient,
            _ => ErrorCategory::Server,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HubError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for HubError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// Conversion from anyhow::Error (for adapters that report through anyhow)
impl From<anyhow::Error> for HubError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, HubError>`.
pub type Result<T> = std::result::Result<T, HubError>;
