//! Derived, server-sourced state scoped to the current user.

mod background;
mod balance;
mod cell;
mod identity;
mod progression;

pub use background::BackgroundProvider;
pub use balance::BalanceProvider;
pub use cell::{ProviderState, SnapshotCell, Ticket};
pub use identity::{IdentityBound, IdentityListener, ListenerHandle};
pub use progression::ProgressionProvider;
