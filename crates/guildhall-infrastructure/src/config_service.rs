//! Configuration service implementation.
//!
//! Loads `HubConfig` from `config.toml`, applies environment overrides,
//! and caches the result.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use guildhall_core::HubError;
use guildhall_core::config::{HubConfig, parse_flag};

use crate::paths::HubPaths;

pub const ENV_BASE_URL: &str = "GUILDHALL_API_BASE_URL";
pub const ENV_SESSION_COOKIE: &str = "GUILDHALL_SESSION_COOKIE";
pub const ENV_MAINTENANCE_MODE: &str = "MAINTENANCE_MODE";
pub const ENV_LOG: &str = "GUILDHALL_LOG";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<HubConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform default `config.toml`.
    pub fn new() -> Result<Self, HubError> {
        let path = HubPaths::config_file().map_err(|e| HubError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading an explicit file (used by `--config` and tests).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file and process environment if not cached.
    pub fn get_config(&self) -> Result<HubConfig, HubError> {
        self.get_config_with_env(|key| std::env::var(key).ok())
    }

    /// Same as `get_config`, with an injectable environment lookup.
    pub fn get_config_with_env<F>(&self, lookup: F) -> Result<HubConfig, HubError>
    where
        F: Fn(&str) -> Option<String>,
    {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = Self::load_file(&self.path)?;
        Self::apply_overrides(&mut loaded, lookup);

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Reads a config file. A missing file yields defaults.
    pub fn load_file(path: &Path) -> Result<HubConfig, HubError> {
        if !path.exists() {
            tracing::debug!("[Config] No config file at {:?}, using defaults", path);
            return Ok(HubConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            HubError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| HubError::config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Applies environment overrides on top of file values.
    pub fn apply_overrides<F>(config: &mut HubConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.api.base_url = base_url.trim().to_string();
        }
        if let Some(cookie) = lookup(ENV_SESSION_COOKIE).filter(|v| !v.trim().is_empty()) {
            config.api.session_cookie = Some(cookie);
        }
        if let Some(flag) = lookup(ENV_MAINTENANCE_MODE) {
            config.features.maintenance_mode = parse_flag(&flag);
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            config.logging.level = level;
        }
    }
}
