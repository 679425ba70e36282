//! Infrastructure layer: HTTP service wrappers and configuration loading.
//!
//! Every wrapper is a stateless struct over a shared [`ApiClient`] and
//! implements one service trait from `guildhall-core`.

pub mod auth_service;
pub mod balance_service;
pub mod config_service;
pub mod file_service;
pub mod health_service;
pub mod http;
pub mod notification_service;
pub mod paths;
pub mod profile_service;
pub mod progression_service;
pub mod shop_service;

pub use crate::auth_service::HttpAuthService;
pub use crate::balance_service::HttpBalanceService;
pub use crate::config_service::ConfigService;
pub use crate::file_service::HttpFileService;
pub use crate::health_service::HttpHealthService;
pub use crate::http::ApiClient;
pub use crate::notification_service::HttpNotificationService;
pub use crate::profile_service::HttpProfileService;
pub use crate::progression_service::HttpProgressionService;
pub use crate::shop_service::HttpShopService;
