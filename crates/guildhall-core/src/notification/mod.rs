//! Notification domain module.

mod model;
mod service;

pub use model::{MAX_PAGE_LIMIT, Notification, NotificationPage, clamp_limit};
pub use service::NotificationService;
