//! Application layer for Guildhall.
//!
//! Owns the client-side state: the session store, the providers derived from
//! it, notification polling, route guards, and the mutations that invalidate
//! provider state.

pub mod access;
pub mod actions;
pub mod notification;
pub mod provider;
pub mod session;

#[cfg(test)]
mod testing;

pub use access::{AccessDecision, AccessGuard, GateDecision, MaintenanceGate, Requirement, Route};
pub use actions::{FileActions, ShopActions};
pub use notification::{NotificationPager, NotificationPoller, PollerHandle, RecentNotifications};
pub use provider::{
    BackgroundProvider, BalanceProvider, IdentityBound, IdentityListener, ListenerHandle,
    ProgressionProvider, ProviderState,
};
pub use session::SessionStore;
