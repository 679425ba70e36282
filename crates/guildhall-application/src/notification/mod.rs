//! Notification polling and history paging.

mod pager;
mod poller;

pub use pager::NotificationPager;
pub use poller::{NotificationPoller, PollerHandle, RecentNotifications};
