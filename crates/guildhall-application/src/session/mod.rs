//! Session lifecycle for the client.

mod store;

pub use store::SessionStore;
